use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::RoundingStrategy;

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {millis} is out of range"))
    })
}

/// Parses the timestamp formats found in activity records.
///
/// Accepts RFC 3339 (`2024-01-02T10:00:00.123+00:00`), naive date-times
/// (`2024-01-02T10:00:00`, treated as UTC) and bare dates (`2024-01-02`,
/// midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Rounds `value` half-away-from-zero to `places` decimals using exact decimal
/// arithmetic, so `0.75 * 100` always displays as `75.0`.
pub fn round_for_display(value: f64, places: u32) -> ChartResult<Decimal> {
    let decimal = Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData(format!("{value} cannot be represented as a decimal"))
    })?;
    Ok(decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).single().expect("time");
        assert_eq!(parse_timestamp("2024-01-02T10:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T12:00:00.000+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-02T10:00:00"), Some(expected));
        assert!(parse_timestamp("2024-01-02").is_some());
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn display_rounding_is_half_away_from_zero() {
        assert_eq!(round_for_display(2.125, 2).expect("round").to_string(), "2.13");
        assert_eq!(round_for_display(-0.5, 0).expect("round").to_string(), "-1");
        assert!(round_for_display(f64::NAN, 2).is_err());
    }
}

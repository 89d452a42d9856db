use chrono::{DateTime, Utc};

use crate::core::primitives::round_for_display;

const NOT_A_NUMBER: &str = "-";

/// Exact decimal text with at most `places` decimals and no trailing zeros.
#[must_use]
pub fn format_plain(value: f64, places: u32) -> String {
    round_for_display(value, places)
        .map(|decimal| decimal.normalize().to_string())
        .unwrap_or_else(|_| NOT_A_NUMBER.to_owned())
}

/// Decimal text with exactly `places` decimals (`1.50`, `75.0`).
#[must_use]
pub fn format_fixed(value: f64, places: u32) -> String {
    round_for_display(value, places)
        .map(|decimal| format!("{decimal:.prec$}", prec = places as usize))
        .unwrap_or_else(|_| NOT_A_NUMBER.to_owned())
}

/// Share in `0..=1` rendered as a percentage: `format_percent(0.75, 1)` is `75.0%`.
#[must_use]
pub fn format_percent(fraction: f64, places: u32) -> String {
    format!("{}%", format_fixed(fraction * 100.0, places))
}

/// Axis number: `950`, `1.5K`, `2.0M`.
#[must_use]
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{}M", format_fixed(value / 1_000_000.0, 1))
    } else if magnitude >= 1_000.0 {
        format!("{}K", format_fixed(value / 1_000.0, 1))
    } else {
        format_plain(value, 0)
    }
}

/// XP expressed the way the platform shows sizes: `1.2kB` from 1000 up, else `500B`.
#[must_use]
pub fn format_xp_size(amount: f64) -> String {
    if amount >= 1_000.0 {
        format!("{}kB", format_fixed(amount / 1_000.0, 1))
    } else {
        format!("{}B", format_plain(amount, 0))
    }
}

#[must_use]
pub fn format_iso_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

/// Short tick label such as `Jan 5`.
#[must_use]
pub fn format_short_date(time: DateTime<Utc>) -> String {
    time.format("%b %-d").to_string()
}

/// Shortens labels longer than `limit` characters to `keep` characters plus `ellipsis`.
#[must_use]
pub fn truncate_label(label: &str, limit: usize, keep: usize, ellipsis: &str) -> String {
    if label.chars().count() <= limit {
        return label.to_owned();
    }
    let mut shortened: String = label.chars().take(keep).collect();
    shortened.push_str(ellipsis);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn percentages_keep_requested_places() {
        assert_eq!(format_percent(0.75, 1), "75.0%");
        assert_eq!(format_percent(0.5, 0), "50%");
        assert_eq!(format_fixed(1.5, 2), "1.50");
    }

    #[test]
    fn compact_and_size_labels() {
        assert_eq!(format_compact(150.0), "150");
        assert_eq!(format_compact(1_500.0), "1.5K");
        assert_eq!(format_compact(2_000_000.0), "2.0M");
        assert_eq!(format_xp_size(1_234.0), "1.2kB");
        assert_eq!(format_xp_size(500.0), "500B");
    }

    #[test]
    fn dates_and_truncation() {
        let time = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).single().expect("time");
        assert_eq!(format_iso_date(time), "2024-01-05");
        assert_eq!(format_short_date(time), "Jan 5");
        assert_eq!(
            truncate_label("piscine-go-final-exam", 15, 12, "..."),
            "piscine-go-f..."
        );
        assert_eq!(truncate_label("short", 15, 12, "..."), "short");
    }
}

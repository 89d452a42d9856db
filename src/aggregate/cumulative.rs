use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::aggregate::XpTransaction;
use crate::core::{DataPoint, PointMeta, Series, SeriesPoint};

/// Running XP total over time.
///
/// Records are put in ascending time order first: an ascending input is kept,
/// a descending input is reversed, anything else is stable-sorted by time.
/// Each output point's `y` is the prefix sum up to and including that record.
///
/// Returns `None` when no record carries a usable timestamp and amount, which
/// callers treat as the "no data" signal.
pub fn cumulative_series<'a>(
    records: impl IntoIterator<Item = &'a XpTransaction>,
) -> Option<Series> {
    let mut samples: Vec<(DateTime<Utc>, f64, &str)> = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        match record.timestamp() {
            Some(time) if record.amount.is_finite() => {
                samples.push((time, record.amount, record.object_name()));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "ignoring xp records without a usable timestamp or amount");
    }
    if samples.is_empty() {
        debug!("cumulative series has no data");
        return None;
    }

    order_chronologically(&mut samples);

    let mut running = 0.0;
    let points = samples
        .into_iter()
        .map(|(time, amount, name)| {
            running += amount;
            SeriesPoint::new(
                DataPoint::at_time(time, running),
                PointMeta::named(name).with_date(time),
            )
        })
        .collect();

    Some(Series::new(points).with_label("Cumulative XP"))
}

fn order_chronologically<T>(samples: &mut [(DateTime<Utc>, f64, T)]) {
    let ascending = samples.windows(2).all(|pair| pair[0].0 <= pair[1].0);
    if ascending {
        return;
    }

    let descending = samples.windows(2).all(|pair| pair[0].0 >= pair[1].0);
    if descending {
        samples.reverse();
    } else {
        samples.sort_by_key(|sample| sample.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_input_is_reversed_before_summing() {
        let records = vec![
            XpTransaction::new(50.0, "2024-01-02"),
            XpTransaction::new(100.0, "2024-01-01"),
        ];
        let series = cumulative_series(&records).expect("series");
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![100.0, 150.0]);
    }

    #[test]
    fn unordered_input_is_sorted_by_time() {
        let records = vec![
            XpTransaction::new(1.0, "2024-01-02"),
            XpTransaction::new(10.0, "2024-01-03"),
            XpTransaction::new(100.0, "2024-01-01"),
        ];
        let series = cumulative_series(&records).expect("series");
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![100.0, 101.0, 111.0]);
    }

    #[test]
    fn records_without_timestamp_are_skipped() {
        let records = vec![
            XpTransaction::new(5.0, "not a date"),
            XpTransaction::new(7.0, "2024-03-01T12:00:00Z"),
        ];
        let series = cumulative_series(&records).expect("series");
        assert_eq!(series.len(), 1);
        assert_eq!(series.last().map(|p| p.point.y), Some(7.0));
    }

    #[test]
    fn empty_input_signals_no_data() {
        let records: Vec<XpTransaction> = Vec::new();
        assert!(cumulative_series(&records).is_none());
    }
}

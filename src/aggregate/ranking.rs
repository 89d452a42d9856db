use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::aggregate::XpTransaction;

/// Number of groups kept by the ranked bar chart.
pub const TOP_N: usize = 10;

/// One group of a ranked aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub total: f64,
}

impl RankedEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// Sums values per key and sorts groups by descending total.
///
/// Grouping preserves first-encountered order and the sort is stable, so tied
/// totals keep that order. Non-finite values are ignored.
pub fn group_sum_descending<K: Into<String>>(
    items: impl IntoIterator<Item = (K, f64)>,
) -> Vec<RankedEntry> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for (key, value) in items {
        if !value.is_finite() {
            continue;
        }
        *totals.entry(key.into()).or_insert(0.0) += value;
    }

    let mut ranked: Vec<RankedEntry> = totals
        .into_iter()
        .map(|(key, total)| RankedEntry { key, total })
        .collect();
    ranked.sort_by_key(|entry| std::cmp::Reverse(OrderedFloat(entry.total)));
    ranked
}

/// [`group_sum_descending`] truncated to the first `n` groups.
pub fn rank_top_n<K: Into<String>>(
    items: impl IntoIterator<Item = (K, f64)>,
    n: usize,
) -> Vec<RankedEntry> {
    let mut ranked = group_sum_descending(items);
    ranked.truncate(n);
    ranked
}

/// Top `n` objects of `object_kind` by summed positive XP.
///
/// Transactions without an object, of another kind, or with a non-positive
/// amount do not contribute.
pub fn project_xp_ranking<'a>(
    records: impl IntoIterator<Item = &'a XpTransaction>,
    object_kind: &str,
    n: usize,
) -> Vec<RankedEntry> {
    let contributions = records.into_iter().filter(|record| {
        record.amount > 0.0 && record.object_kind() == Some(object_kind)
    });
    let ranked = rank_top_n(
        contributions.map(|record| (record.object_name(), record.amount)),
        n,
    );
    trace!(groups = ranked.len(), object_kind, "ranked xp by object");
    ranked
}

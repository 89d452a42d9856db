use tracing::trace;

use crate::aggregate::ranking::{RankedEntry, group_sum_descending};
use crate::aggregate::SkillTransaction;

/// Prefix marking skill tallies in the activity feed.
pub const SKILL_PREFIX: &str = "skill_";

/// Turns `skill_front-end` into `front end`.
///
/// Keys without `prefix` are not skill categories and yield `None`, as does a
/// key that is empty once the prefix and separators are gone.
#[must_use]
pub fn normalize_skill_key(raw: &str, prefix: &str) -> Option<String> {
    let stripped = raw.trim().strip_prefix(prefix)?;
    let cleaned: String = stripped
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let cleaned = cleaned.trim().to_lowercase();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Sums skill amounts per normalized category, largest first.
///
/// The ordering only gives the radar polygon a tidier shape; ties keep
/// first-encountered order.
pub fn normalize_skills<'a>(
    records: impl IntoIterator<Item = &'a SkillTransaction>,
    prefix: &str,
) -> Vec<RankedEntry> {
    let categories = group_sum_descending(records.into_iter().filter_map(|record| {
        normalize_skill_key(&record.kind, prefix).map(|key| (key, record.amount))
    }));
    trace!(categories = categories.len(), "normalized skill categories");
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_separators_are_stripped() {
        assert_eq!(
            normalize_skill_key("skill_Front-End", SKILL_PREFIX).as_deref(),
            Some("front end")
        );
        assert_eq!(normalize_skill_key("xp_go", SKILL_PREFIX), None);
        assert_eq!(normalize_skill_key("skill_", SKILL_PREFIX), None);
    }

    #[test]
    fn amounts_are_summed_per_category() {
        let records = vec![
            SkillTransaction::new("skill_go", 10.0),
            SkillTransaction::new("skill_go", 5.0),
            SkillTransaction::new("skill_js", 8.0),
            SkillTransaction::new("level", 99.0),
        ];
        let categories = normalize_skills(&records, SKILL_PREFIX);
        assert_eq!(
            categories,
            vec![RankedEntry::new("go", 15.0), RankedEntry::new("js", 8.0)]
        );
    }
}

//! Reductions applied to raw activity records before any geometry is built.
//!
//! Every function here is pure and treats empty input as a valid terminal
//! state (an empty group list, a zero tally, or `None` for series).

pub mod cumulative;
pub mod ranking;
pub mod records;
pub mod skills;
pub mod tally;

pub use cumulative::cumulative_series;
pub use ranking::{RankedEntry, TOP_N, group_sum_descending, project_xp_ranking, rank_top_n};
pub use records::{
    AuditSummary, ObjectRef, ResultRecord, SkillTransaction, UNKNOWN_LABEL, XpTransaction,
};
pub use skills::{SKILL_PREFIX, normalize_skill_key, normalize_skills};
pub use tally::{PassFailTally, RatioSplit, tally_pass_fail};

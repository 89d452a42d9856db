//! Decoded activity records consumed by the aggregators.
//!
//! Field names follow the upstream JSON (`createdAt`, `totalUp`, `type`).
//! Every field is defaulted so a record missing optional data still decodes;
//! fallbacks are applied by the accessors rather than at decode time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::parse_timestamp;

/// Label used wherever a record does not name its object.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ObjectRef {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
        }
    }
}

fn object_label(object: Option<&ObjectRef>) -> &str {
    object
        .and_then(|object| object.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
}

/// XP transaction: a signed amount earned at an instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpTransaction {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub object: Option<ObjectRef>,
}

impl XpTransaction {
    #[must_use]
    pub fn new(amount: f64, created_at: impl Into<String>) -> Self {
        Self {
            amount,
            created_at: created_at.into(),
            object: None,
        }
    }

    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.object = Some(ObjectRef::new(name, kind));
        self
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    #[must_use]
    pub fn object_name(&self) -> &str {
        object_label(self.object.as_ref())
    }

    #[must_use]
    pub fn object_kind(&self) -> Option<&str> {
        self.object.as_ref().and_then(|object| object.kind.as_deref())
    }
}

/// Graded result or progress event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub object: Option<ObjectRef>,
}

impl ResultRecord {
    #[must_use]
    pub fn new(grade: Option<f64>, created_at: impl Into<String>) -> Self {
        Self {
            grade,
            created_at: created_at.into(),
            path: String::new(),
            object: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object = Some(ObjectRef {
            name: Some(name.into()),
            kind: None,
        });
        self
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Grade with the missing-grade fallback of `0.0`.
    #[must_use]
    pub fn grade_or_zero(&self) -> f64 {
        self.grade.filter(|grade| grade.is_finite()).unwrap_or(0.0)
    }

    #[must_use]
    pub fn object_name(&self) -> &str {
        object_label(self.object.as_ref())
    }
}

/// Audit totals for one learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    #[serde(default)]
    pub total_up: f64,
    #[serde(default)]
    pub total_down: f64,
    #[serde(default)]
    pub audit_ratio: Option<f64>,
}

impl AuditSummary {
    #[must_use]
    pub fn new(total_up: f64, total_down: f64) -> Self {
        Self {
            total_up,
            total_down,
            audit_ratio: (total_down > 0.0).then(|| total_up / total_down),
        }
    }

    #[must_use]
    pub fn with_audit_ratio(mut self, ratio: Option<f64>) -> Self {
        self.audit_ratio = ratio;
        self
    }
}

/// Skill tally; `kind` carries a prefixed category key such as `skill_go`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillTransaction {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: f64,
}

impl SkillTransaction {
    #[must_use]
    pub fn new(kind: impl Into<String>, amount: f64) -> Self {
        Self {
            kind: kind.into(),
            amount,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, ScaleDomain};

/// Metadata attached to one sample for labels and tooltips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMeta {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl PointMeta {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub point: DataPoint,
    pub meta: PointMeta,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(point: DataPoint, meta: PointMeta) -> Self {
        Self { point, meta }
    }
}

/// Ordered samples; insertion order is significant.
///
/// Aggregators never reorder a series in place: re-sorting produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    label: Option<String>,
    points: Vec<SeriesPoint>,
}

impl Series {
    #[must_use]
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self {
            label: None,
            points,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|sample| sample.point.y)
    }

    #[must_use]
    pub fn x_domain(&self) -> Option<ScaleDomain> {
        ScaleDomain::from_values(self.points.iter().map(|sample| sample.point.x))
    }

    #[must_use]
    pub fn y_domain(&self) -> Option<ScaleDomain> {
        ScaleDomain::from_values(self.values())
    }
}

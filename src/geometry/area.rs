use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::geometry::path::{PathData, line_path};

/// Stroke and fill geometry for an area series.
///
/// `fill_polygon` holds the mapped points followed by two baseline vertices
/// (below the last point, then below the first); consumers close it
/// implicitly back to the first point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub line: PathData,
    pub fill_polygon: Vec<PixelPoint>,
}

impl AreaGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fill polygon as an explicitly closed path.
    #[must_use]
    pub fn fill_path(&self) -> PathData {
        if self.fill_polygon.is_empty() {
            return PathData::new();
        }
        line_path(&self.fill_polygon).close()
    }
}

/// Builds stroke and fill geometry for points already mapped to pixels.
#[must_use]
pub fn area_geometry(points: &[PixelPoint], baseline_y: f64) -> AreaGeometry {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return AreaGeometry::empty();
    };

    let mut fill_polygon = Vec::with_capacity(points.len() + 2);
    fill_polygon.extend_from_slice(points);
    fill_polygon.push(PixelPoint::new(last.x, baseline_y));
    fill_polygon.push(PixelPoint::new(first.x, baseline_y));

    AreaGeometry {
        line: line_path(points),
        fill_polygon,
    }
}

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

/// One spoke of the radar: the axis end point and where its label sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub angle_rad: f64,
    pub end: PixelPoint,
    pub label_anchor: PixelPoint,
}

/// Grid rings, spokes and the value polygon for one radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarGeometry {
    pub center: PixelPoint,
    pub radius: f64,
    pub rings: Vec<f64>,
    pub axes: Vec<RadarAxis>,
    pub vertices: Vec<PixelPoint>,
}

fn along(center: PixelPoint, angle: f64, distance: f64) -> PixelPoint {
    PixelPoint::new(
        center.x + angle.cos() * distance,
        center.y + angle.sin() * distance,
    )
}

/// Lays out `values.len()` axes evenly around `center`, the first pointing up.
///
/// Each vertex sits at `radius * value / max(values)` along its axis; negative
/// values are pinned to the center. `ring_count` concentric rings split the
/// radius evenly, the outermost on the radius itself.
pub fn radar_geometry(
    values: &[f64],
    center: PixelPoint,
    radius: f64,
    ring_count: usize,
    label_offset: f64,
) -> ChartResult<RadarGeometry> {
    if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "radar center must be finite and radius > 0".to_owned(),
        ));
    }
    if !label_offset.is_finite() {
        return Err(ChartError::InvalidData(
            "radar label offset must be finite".to_owned(),
        ));
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ChartError::InvalidData(
            "radar values must be finite".to_owned(),
        ));
    }

    let max_value = values.iter().copied().fold(0.0_f64, f64::max);
    let angle_step = if values.is_empty() {
        0.0
    } else {
        TAU / values.len() as f64
    };

    let mut axes = Vec::with_capacity(values.len());
    let mut vertices = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let angle = index as f64 * angle_step - FRAC_PI_2;
        let ratio = if max_value > 0.0 {
            (value / max_value).max(0.0)
        } else {
            0.0
        };
        axes.push(RadarAxis {
            angle_rad: angle,
            end: along(center, angle, radius),
            label_anchor: along(center, angle, radius + label_offset),
        });
        vertices.push(along(center, angle, radius * ratio));
    }

    let rings = (1..=ring_count)
        .map(|ring| radius * ring as f64 / ring_count as f64)
        .collect();

    Ok(RadarGeometry {
        center,
        radius,
        rings,
        axes,
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_axis_points_up_and_largest_value_touches_rim() {
        let center = PixelPoint::new(100.0, 100.0);
        let geometry = radar_geometry(&[15.0, 8.0], center, 50.0, 5, 18.0).expect("radar");

        assert_eq!(geometry.vertices.len(), 2);
        assert_eq!(geometry.rings.len(), 5);
        assert_abs_diff_eq!(geometry.rings[4], 50.0, epsilon = 1e-9);

        let top = geometry.vertices[0];
        assert_abs_diff_eq!(top.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top.y, 50.0, epsilon = 1e-9);

        let second = geometry.vertices[1];
        assert_abs_diff_eq!(second.y, 100.0 + 50.0 * 8.0 / 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geometry.axes[0].label_anchor.y, 100.0 - 68.0, epsilon = 1e-9);
    }
}

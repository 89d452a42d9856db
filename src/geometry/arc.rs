use smallvec::{SmallVec, smallvec};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::geometry::path::{PathCommand, PathData};

/// Polar to Cartesian with `0°` at the top and angles growing clockwise.
#[must_use]
pub fn polar_to_cartesian(center: PixelPoint, radius: f64, angle_deg: f64) -> PixelPoint {
    let radians = (angle_deg - 90.0).to_radians();
    PixelPoint::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Path for a circular arc from `start_deg` to `end_deg`, clockwise.
///
/// A sweep of 360° or more is drawn as two opposing semicircles since a single
/// arc command cannot close on itself. A zero sweep yields an empty path.
pub fn describe_arc(
    center: PixelPoint,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> ChartResult<PathData> {
    if !center.is_finite() || !start_deg.is_finite() || !end_deg.is_finite() {
        return Err(ChartError::InvalidData(
            "arc center and angles must be finite".to_owned(),
        ));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "arc radius must be finite and > 0".to_owned(),
        ));
    }

    let sweep = end_deg - start_deg;
    if sweep < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "arc end angle ({end_deg}) must not precede its start ({start_deg})"
        )));
    }
    if sweep == 0.0 {
        return Ok(PathData::new());
    }

    let commands: SmallVec<[PathCommand; 4]> = if sweep >= 360.0 {
        let left = PixelPoint::new(center.x - radius, center.y);
        let right = PixelPoint::new(center.x + radius, center.y);
        smallvec![
            PathCommand::MoveTo(left),
            PathCommand::Arc {
                radius,
                large_arc: true,
                clockwise: false,
                to: right,
            },
            PathCommand::Arc {
                radius,
                large_arc: true,
                clockwise: false,
                to: left,
            },
            PathCommand::Close,
        ]
    } else {
        smallvec![
            PathCommand::MoveTo(polar_to_cartesian(center, radius, start_deg)),
            PathCommand::Arc {
                radius,
                large_arc: sweep > 180.0,
                clockwise: true,
                to: polar_to_cartesian(center, radius, end_deg),
            },
        ]
    };

    Ok(commands.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_degrees_is_top_and_ninety_is_right() {
        let center = PixelPoint::new(100.0, 100.0);
        let top = polar_to_cartesian(center, 50.0, 0.0);
        assert_abs_diff_eq!(top.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top.y, 50.0, epsilon = 1e-9);

        let right = polar_to_cartesian(center, 50.0, 90.0);
        assert_abs_diff_eq!(right.x, 150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn large_arc_flag_follows_sweep() {
        let center = PixelPoint::new(0.0, 0.0);
        let small = describe_arc(center, 10.0, 0.0, 90.0).expect("arc");
        let large = describe_arc(center, 10.0, 0.0, 270.0).expect("arc");
        assert!(matches!(
            small.commands()[1],
            PathCommand::Arc {
                large_arc: false,
                ..
            }
        ));
        assert!(matches!(
            large.commands()[1],
            PathCommand::Arc { large_arc: true, .. }
        ));
    }

    #[test]
    fn full_sweep_uses_two_semicircles() {
        let path = describe_arc(PixelPoint::new(50.0, 50.0), 20.0, 0.0, 360.0).expect("arc");
        let arcs = path
            .commands()
            .iter()
            .filter(|command| matches!(command, PathCommand::Arc { .. }))
            .count();
        assert_eq!(arcs, 2);
        assert!(path.is_closed());
        assert_eq!(path.to_svg(), "M 30 50 A 20 20 0 1 0 70 50 A 20 20 0 1 0 30 50 Z");
    }

    #[test]
    fn reversed_angles_are_rejected() {
        assert!(describe_arc(PixelPoint::new(0.0, 0.0), 10.0, 90.0, 10.0).is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, LinearScale, PixelPoint, PlotArea, TimeScale};
use crate::error::{ChartError, ChartResult};

/// Unconnected circular marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub center: PixelPoint,
    pub radius: f64,
}

/// Maps time/value samples into the plot area.
///
/// `x` is read as unix milliseconds through `time_scale`, `y` through
/// `value_scale` with larger values drawn higher.
pub fn project_time_points(
    points: &[DataPoint],
    time_scale: TimeScale,
    value_scale: LinearScale,
    plot: PlotArea,
) -> ChartResult<Vec<PixelPoint>> {
    let x_range = plot.x_range();
    let y_range = plot.y_range();
    points
        .iter()
        .map(|point| {
            Ok(PixelPoint::new(
                time_scale.millis_to_pixel(point.x, x_range)?,
                value_scale.domain_to_pixel(point.y, y_range)?,
            ))
        })
        .collect()
}

/// One marker per point; no connecting path.
pub fn scatter_markers(points: &[PixelPoint], radius: f64) -> ChartResult<Vec<Marker>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "marker radius must be finite and > 0".to_owned(),
        ));
    }
    Ok(points
        .iter()
        .map(|center| Marker {
            center: *center,
            radius,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_instant_lands_on_horizontal_midpoint() {
        let plot = PlotArea {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 100.0,
        };
        let time_scale = TimeScale::from_millis(1_000.0, 1_000.0).expect("time scale");
        let value_scale = LinearScale::new(0.0, 2.0).expect("value scale");

        let mapped =
            project_time_points(&[DataPoint::new(1_000.0, 1.0)], time_scale, value_scale, plot)
                .expect("project");
        assert_eq!(mapped, vec![PixelPoint::new(100.0, 50.0)]);

        let markers = scatter_markers(&mapped, 4.0).expect("markers");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].radius, 4.0);
    }
}

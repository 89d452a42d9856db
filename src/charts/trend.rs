use chrono::{DateTime, Utc};
use tracing::debug;

use crate::aggregate::ResultRecord;
use crate::charts::axis::{axis_lines, tick_fractions};
use crate::charts::format::{format_iso_date, format_plain, format_short_date};
use crate::charts::{ChartFilter, ChartSpec, EmptyState, RenderOutcome};
use crate::core::{DataPoint, LinearScale, TimeScale};
use crate::error::ChartResult;
use crate::geometry::{project_time_points, scatter_markers};
use crate::interaction::PointHandle;
use crate::render::{CirclePrimitive, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub const NO_PROGRESS: &str = "Not enough progress data for this time range.";
pub const ZERO_GRADES: &str = "All plotted grades are zero";

const TICK_ROTATION_DEG: f64 = -45.0;

/// Card title for the trend chart: `Progress Trend (All Time)` or
/// `Progress Trend (Last 30 Days)`.
#[must_use]
pub fn trend_title(filter: Option<&ChartFilter>) -> String {
    match filter.and_then(|filter| filter.window_days()) {
        Some(days) => format!("Progress Trend (Last {days} Days)"),
        None => "Progress Trend (All Time)".to_owned(),
    }
}

struct TrendPoint<'a> {
    time: DateTime<Utc>,
    grade: f64,
    name: &'a str,
}

/// Passing results over time as unconnected markers.
///
/// Only results with a path and a grade at or above the pass threshold are
/// plotted; the chart filter narrows them to a date window. The y axis spans
/// at least up to the configured grade ceiling.
pub fn render_trend(results: &[ResultRecord], spec: &ChartSpec) -> ChartResult<RenderOutcome> {
    let tuning = &spec.tuning;
    let mut points: Vec<TrendPoint<'_>> = results
        .iter()
        .filter(|result| !result.path.is_empty())
        .filter(|result| result.grade_or_zero() >= tuning.pass_threshold)
        .filter_map(|result| {
            let time = result.timestamp()?;
            spec.admits(Some(time)).then(|| TrendPoint {
                time,
                grade: result.grade_or_zero(),
                name: result.object_name(),
            })
        })
        .collect();

    if points.is_empty() {
        debug!(results = results.len(), "no progress points in range");
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_PROGRESS)));
    }
    let max_grade = points.iter().map(|point| point.grade).fold(0.0_f64, f64::max);
    if max_grade <= 0.0 {
        return Ok(RenderOutcome::Empty(EmptyState::zero_magnitude(ZERO_GRADES)));
    }
    points.sort_by_key(|point| point.time);

    let palette = &spec.palette;
    let plot = spec.viewport.plot_area()?;
    let Some(time_scale) = TimeScale::from_instants(points.iter().map(|point| point.time)) else {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_PROGRESS)));
    };
    let value_scale = LinearScale::new(0.0, tuning.grade_ceiling.max(max_grade))?;
    let y_range = plot.y_range();
    let x_range = plot.x_range();

    let samples: Vec<DataPoint> = points
        .iter()
        .map(|point| DataPoint::at_time(point.time, point.grade))
        .collect();
    let pixels = project_time_points(&samples, time_scale, value_scale, plot)?;
    let markers = scatter_markers(&pixels, tuning.marker_radius_px)?;

    let mut frame = RenderFrame::new(spec.viewport);

    let y_max = value_scale.domain().max();
    for fraction in tick_fractions(tuning.trend_y_gridlines) {
        let value = fraction * y_max;
        let y = value_scale.domain_to_pixel(value, y_range)?;
        frame = frame
            .with_line(LinePrimitive::new(plot.left, y, plot.right(), y, 1.0, palette.grid))
            .with_text(TextPrimitive::new(
                format!("{}%", format_plain(value * 100.0, 0)),
                plot.left - 8.0,
                y + 4.0,
                tuning.axis_font_px,
                palette.muted_text,
                TextHAlign::Right,
            ));
    }

    let ticks = if time_scale.is_degenerate() {
        vec![points[0].time]
    } else {
        time_scale.evenly_spaced(tuning.trend_x_ticks)?
    };
    for tick in ticks {
        let x = time_scale.time_to_pixel(tick, x_range)?;
        frame = frame.with_text(
            TextPrimitive::new(
                format_short_date(tick),
                x,
                plot.bottom() + 15.0,
                tuning.axis_font_px,
                palette.muted_text,
                TextHAlign::Right,
            )
            .rotated(TICK_ROTATION_DEG),
        );
    }
    for line in axis_lines(plot, palette.axis) {
        frame = frame.with_line(line);
    }

    for (marker, point) in markers.iter().zip(&points) {
        frame = frame
            .with_circle(CirclePrimitive::filled(
                marker.center.x,
                marker.center.y,
                marker.radius,
                palette.marker,
            ))
            .with_handle(
                PointHandle::new(
                    marker.center.x,
                    marker.center.y,
                    marker.radius,
                    point.name,
                    format!("{}%", format_plain(point.grade * 100.0, 1)),
                )
                .with_date(format_iso_date(point.time)),
            );
    }

    debug!(points = markers.len(), max_grade, "rendered progress trend");
    Ok(RenderOutcome::Rendered(frame))
}

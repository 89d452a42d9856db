use tracing::debug;

use crate::aggregate::{XpTransaction, cumulative_series};
use crate::charts::axis::{axis_lines, thin_label_indices, tick_fractions};
use crate::charts::format::{format_compact, format_iso_date, format_plain, format_short_date};
use crate::charts::{ChartSpec, EmptyState, RenderOutcome};
use crate::core::{DataPoint, LinearScale, TimeScale};
use crate::error::ChartResult;
use crate::geometry::{area_geometry, project_time_points};
use crate::interaction::PointHandle;
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, PolygonPrimitive, RenderFrame, Stroke,
    TextHAlign, TextPrimitive,
};

pub const NO_XP_DATA: &str = "No XP data yet";
pub const ZERO_XP: &str = "XP total is zero";

const LINE_WIDTH_PX: f64 = 2.0;

/// Running XP total as an area chart with markers and thinned date labels.
///
/// The y axis always includes zero; the final point carries the total as a
/// label. A running total that never rises above zero is reported as
/// `ZeroMagnitude`.
pub fn render_cumulative(records: &[XpTransaction], spec: &ChartSpec) -> ChartResult<RenderOutcome> {
    let admitted = records.iter().filter(|record| spec.admits(record.timestamp()));
    let Some(series) = cumulative_series(admitted) else {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_XP_DATA)));
    };

    let peak = series.values().fold(f64::MIN, f64::max);
    if peak <= 0.0 {
        debug!(points = series.len(), "cumulative xp is zero");
        return Ok(RenderOutcome::Empty(EmptyState::zero_magnitude(ZERO_XP)));
    }

    let tuning = &spec.tuning;
    let palette = &spec.palette;
    let plot = spec.viewport.plot_area()?;

    let samples: Vec<DataPoint> = series.points().iter().map(|sample| sample.point).collect();
    let Some(x_domain) = series.x_domain() else {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_XP_DATA)));
    };
    let Some(y_domain) = series.y_domain() else {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_XP_DATA)));
    };
    let time_scale = TimeScale::from_millis(x_domain.min(), x_domain.max())?;
    let value_scale = LinearScale::from_domain(y_domain.including(0.0));
    let y_range = plot.y_range();

    let pixels = project_time_points(&samples, time_scale, value_scale, plot)?;
    let baseline_y = value_scale.domain_to_pixel(0.0, y_range)?;
    let area = area_geometry(&pixels, baseline_y);

    let mut frame = RenderFrame::new(spec.viewport);

    let domain = value_scale.domain();
    for fraction in tick_fractions(tuning.y_tick_intervals) {
        let value = domain.min() + fraction * domain.span();
        let y = value_scale.domain_to_pixel(value, y_range)?;
        frame = frame
            .with_line(
                LinePrimitive::new(plot.left, y, plot.right(), y, 1.0, palette.grid).dashed(3.0),
            )
            .with_text(TextPrimitive::new(
                format_compact(value),
                plot.left - 8.0,
                y + 4.0,
                tuning.axis_font_px,
                palette.muted_text,
                TextHAlign::Right,
            ));
    }
    for line in axis_lines(plot, palette.axis) {
        frame = frame.with_line(line);
    }

    frame = frame
        .with_polygon(PolygonPrimitive::new(area.fill_polygon, palette.area_fill))
        .with_path(PathPrimitive::stroked(
            area.line,
            Stroke::new(palette.line, LINE_WIDTH_PX),
        ));

    for (pixel, sample) in pixels.iter().zip(series.points()) {
        frame = frame.with_circle(CirclePrimitive::filled(
            pixel.x,
            pixel.y,
            tuning.marker_radius_px,
            palette.line,
        ));
        let mut handle = PointHandle::new(
            pixel.x,
            pixel.y,
            tuning.marker_radius_px,
            sample.meta.name.as_deref().unwrap_or_default(),
            format!("{} XP", format_plain(sample.point.y, 2)),
        );
        if let Some(date) = sample.meta.date {
            handle = handle.with_date(format_iso_date(date));
        }
        frame = frame.with_handle(handle);
    }

    for index in thin_label_indices(pixels.len(), tuning.max_x_labels) {
        let Some(date) = series.points()[index].meta.date else {
            continue;
        };
        frame = frame.with_text(TextPrimitive::new(
            format_short_date(date),
            pixels[index].x,
            plot.bottom() + 18.0,
            tuning.axis_font_px,
            palette.muted_text,
            TextHAlign::Center,
        ));
    }

    frame = frame.with_text(TextPrimitive::new(
        "XP",
        10.0,
        plot.top - 10.0,
        tuning.label_font_px,
        palette.text,
        TextHAlign::Left,
    ));
    if let (Some(last_pixel), Some(last)) = (pixels.last(), series.last()) {
        frame = frame.with_text(
            TextPrimitive::new(
                format_plain(last.point.y, 0),
                last_pixel.x,
                last_pixel.y - 10.0,
                tuning.label_font_px,
                palette.text,
                TextHAlign::Right,
            )
            .bold(),
        );
    }

    debug!(points = pixels.len(), peak, "rendered cumulative xp");
    Ok(RenderOutcome::Rendered(frame))
}

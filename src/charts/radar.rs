use tracing::debug;

use crate::aggregate::{SkillTransaction, normalize_skills};
use crate::charts::format::format_plain;
use crate::charts::{ChartSpec, EmptyState, RenderOutcome};
use crate::error::{ChartError, ChartResult};
use crate::geometry::radar_geometry;
use crate::interaction::PointHandle;
use crate::render::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, RenderFrame, Stroke, TextHAlign,
    TextPrimitive,
};

pub const NO_SKILL_DATA: &str = "No skill data yet";
pub const ZERO_SKILLS: &str = "Skill totals are zero";

const VERTEX_RADIUS_PX: f64 = 3.0;

/// One spoke per normalized skill, vertices scaled to the strongest skill.
pub fn render_radar(records: &[SkillTransaction], spec: &ChartSpec) -> ChartResult<RenderOutcome> {
    let tuning = &spec.tuning;
    let categories = normalize_skills(records, &tuning.skill_prefix);
    if categories.is_empty() {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_SKILL_DATA)));
    }
    let max_total = categories.iter().map(|entry| entry.total).fold(0.0_f64, f64::max);
    if max_total <= 0.0 {
        debug!(categories = categories.len(), "skill totals are not positive");
        return Ok(RenderOutcome::Empty(EmptyState::zero_magnitude(ZERO_SKILLS)));
    }

    let palette = &spec.palette;
    let plot = spec.viewport.plot_area()?;
    let fit = plot.width.min(plot.height) / 2.0 - tuning.radar_label_offset_px;
    let radius = tuning.radar_max_radius_px.min(fit);
    if radius <= 0.0 {
        return Err(ChartError::InvalidViewport {
            width: spec.viewport.width,
            height: spec.viewport.height,
        });
    }

    let values: Vec<f64> = categories.iter().map(|entry| entry.total).collect();
    let geometry = radar_geometry(
        &values,
        plot.center(),
        radius,
        tuning.radar_rings,
        tuning.radar_label_offset_px,
    )?;
    let center = geometry.center;
    let grid = Stroke::new(palette.grid, 1.0);

    let mut frame = RenderFrame::new(spec.viewport);
    for ring in &geometry.rings {
        frame = frame.with_circle(CirclePrimitive::outlined(center.x, center.y, *ring, grid));
    }

    for (axis, entry) in geometry.axes.iter().zip(&categories) {
        let cos = axis.angle_rad.cos();
        let h_align = if cos > 0.1 {
            TextHAlign::Left
        } else if cos < -0.1 {
            TextHAlign::Right
        } else {
            TextHAlign::Center
        };
        frame = frame
            .with_line(LinePrimitive::new(
                center.x,
                center.y,
                axis.end.x,
                axis.end.y,
                1.0,
                palette.grid,
            ))
            .with_text(TextPrimitive::new(
                entry.key.clone(),
                axis.label_anchor.x,
                axis.label_anchor.y + 4.0,
                tuning.axis_font_px,
                palette.text,
                h_align,
            ));
    }

    frame = frame.with_polygon(
        PolygonPrimitive::new(geometry.vertices.clone(), palette.radar_fill)
            .with_stroke(Stroke::new(palette.radar_stroke, 2.0)),
    );

    for (vertex, entry) in geometry.vertices.iter().zip(&categories) {
        frame = frame
            .with_circle(CirclePrimitive::filled(
                vertex.x,
                vertex.y,
                VERTEX_RADIUS_PX,
                palette.radar_stroke,
            ))
            .with_handle(PointHandle::new(
                vertex.x,
                vertex.y,
                VERTEX_RADIUS_PX,
                entry.key.clone(),
                format_plain(entry.total, 2),
            ));
    }

    debug!(axes = categories.len(), max_total, "rendered skill radar");
    Ok(RenderOutcome::Rendered(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, EmptyReason, default_viewport};

    #[test]
    fn unprefixed_records_are_no_data() {
        let spec = ChartSpec::new(ChartKind::Radar, default_viewport());
        let records = vec![SkillTransaction::new("xp", 10.0)];
        let outcome = render_radar(&records, &spec).expect("render");
        assert_eq!(outcome.empty_reason(), Some(EmptyReason::NoData));
    }

    #[test]
    fn zero_totals_are_zero_magnitude() {
        let spec = ChartSpec::new(ChartKind::Radar, default_viewport());
        let records = vec![SkillTransaction::new("skill_go", 0.0)];
        let outcome = render_radar(&records, &spec).expect("render");
        assert_eq!(outcome.empty_reason(), Some(EmptyReason::ZeroMagnitude));
    }
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{AuditSummary, RatioSplit, ResultRecord, tally_pass_fail};
use crate::charts::format::{format_fixed, format_percent, format_plain};
use crate::charts::{ChartSpec, EmptyState, RenderOutcome};
use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{describe_arc, polar_to_cartesian};
use crate::interaction::PointHandle;
use crate::render::{
    Color, PathPrimitive, RectPrimitive, RenderFrame, Stroke, TextHAlign, TextPrimitive,
};

pub const NO_AUDIT_DATA: &str = "No audit data yet";
pub const ZERO_AUDITS: &str = "No audits done or received yet";
pub const NO_RESULTS: &str = "No results yet";
pub const ZERO_GRADED: &str = "No graded results yet";

const LEGEND_GAP_PX: f64 = 30.0;
const LEGEND_SWATCH_PX: f64 = 15.0;
const LEGEND_ROW_PX: f64 = 25.0;

/// Which two-way split a ratio donut shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonutVariant {
    /// Audits done vs received, centered on the reported ratio.
    Audit,
    /// Passed vs failed results, centered on the pass rate.
    PassFail,
}

impl DonutVariant {
    fn legend_names(self) -> [&'static str; 2] {
        match self {
            Self::Audit => ["Up Audits", "Down Audits"],
            Self::PassFail => ["Passes", "Fails"],
        }
    }
}

/// Audits done (up) against audits received (down).
///
/// A missing summary or a missing ratio means no data; zero audits on both
/// sides is the zero-magnitude state. Negative totals are rejected.
pub fn render_audit_donut(
    summary: Option<&AuditSummary>,
    spec: &ChartSpec,
) -> ChartResult<RenderOutcome> {
    let Some(summary) = summary else {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_AUDIT_DATA)));
    };
    let Some(ratio) = summary.audit_ratio else {
        debug!("audit summary has no ratio");
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_AUDIT_DATA)));
    };

    let split = RatioSplit::new(summary.total_up, summary.total_down)?;
    if split.fractions().is_none() {
        return Ok(RenderOutcome::Empty(EmptyState::zero_magnitude(ZERO_AUDITS)));
    }

    let colors = [spec.palette.up, spec.palette.down];
    render_split(split, DonutVariant::Audit, format_fixed(ratio, 2), colors, spec)
}

/// Passed against failed results; ungraded results count in neither bucket.
pub fn render_pass_fail_donut(
    results: &[ResultRecord],
    spec: &ChartSpec,
) -> ChartResult<RenderOutcome> {
    if results.is_empty() {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_RESULTS)));
    }

    let tally = tally_pass_fail(results, spec.tuning.pass_threshold);
    let Some(pass_rate) = tally.pass_rate() else {
        debug!(excluded = tally.excluded, "no graded results");
        return Ok(RenderOutcome::Empty(EmptyState::zero_magnitude(ZERO_GRADED)));
    };

    let colors = [spec.palette.pass, spec.palette.fail];
    render_split(
        RatioSplit::from(tally),
        DonutVariant::PassFail,
        format_percent(pass_rate, 0),
        colors,
        spec,
    )
}

fn render_split(
    split: RatioSplit,
    variant: DonutVariant,
    center_label: String,
    colors: [Color; 2],
    spec: &ChartSpec,
) -> ChartResult<RenderOutcome> {
    let (Some(fractions), Some(sweeps)) = (split.fractions(), split.sweep_degrees()) else {
        return Err(ChartError::InvalidData(
            "ratio donut needs a non-zero total".to_owned(),
        ));
    };

    let tuning = &spec.tuning;
    let palette = &spec.palette;
    let plot = spec.viewport.plot_area()?;

    let stroke = tuning.donut_stroke_px;
    let fit = plot.width.min(plot.height) / 2.0 - stroke / 2.0;
    let radius = tuning.donut_radius_px.min(fit);
    if radius <= 0.0 {
        return Err(ChartError::InvalidViewport {
            width: spec.viewport.width,
            height: spec.viewport.height,
        });
    }
    let outer = radius + stroke / 2.0;
    let center = PixelPoint::new(plot.left + outer, plot.center().y);

    let names = variant.legend_names();
    let counts = [split.first(), split.second()];
    let shares = [fractions.0, fractions.1];
    let arcs = [(0.0, sweeps.0), (sweeps.0, 360.0)];

    let mut frame = RenderFrame::new(spec.viewport);
    let legend_x = center.x + outer + LEGEND_GAP_PX;
    let legend_top = center.y - LEGEND_ROW_PX / 2.0 - LEGEND_SWATCH_PX / 2.0;

    for slot in 0..2 {
        let (start, end) = arcs[slot];
        let path = describe_arc(center, radius, start, end)?;
        let detail = format!(
            "{} ({})",
            format_plain(counts[slot], 2),
            format_percent(shares[slot], 1)
        );

        if !path.is_empty() {
            frame = frame.with_path(PathPrimitive::stroked(path, Stroke::new(colors[slot], stroke)));
            let anchor = polar_to_cartesian(center, radius, start + (end - start) / 2.0);
            frame = frame.with_handle(PointHandle::new(
                anchor.x,
                anchor.y,
                stroke / 2.0,
                names[slot],
                detail.clone(),
            ));
        }

        let row_y = legend_top + slot as f64 * LEGEND_ROW_PX;
        frame = frame
            .with_rect(RectPrimitive::new(
                legend_x,
                row_y,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                colors[slot],
            ))
            .with_text(TextPrimitive::new(
                format!("{}: {detail}", names[slot]),
                legend_x + LEGEND_SWATCH_PX + 8.0,
                row_y + LEGEND_SWATCH_PX - 2.0,
                tuning.label_font_px,
                palette.text,
                TextHAlign::Left,
            ));
    }

    frame = frame.with_text(
        TextPrimitive::new(
            center_label,
            center.x,
            center.y + tuning.center_font_px / 3.0,
            tuning.center_font_px,
            palette.text,
            TextHAlign::Center,
        )
        .bold(),
    );

    debug!(
        ?variant,
        first = split.first(),
        second = split.second(),
        "rendered ratio donut"
    );
    Ok(RenderOutcome::Rendered(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, EmptyReason, default_viewport};

    fn spec() -> ChartSpec {
        ChartSpec::new(ChartKind::RatioDonut, default_viewport())
    }

    #[test]
    fn one_sided_split_draws_a_single_full_ring() {
        let summary = AuditSummary::new(12.0, 0.0).with_audit_ratio(Some(12.0));
        let outcome = render_audit_donut(Some(&summary), &spec()).expect("render");
        let frame = outcome.frame().expect("frame");
        assert_eq!(frame.paths.len(), 1);
        assert!(frame.paths[0].data.is_closed());
        assert!(frame.text_values().any(|text| text == "Down Audits: 0 (0.0%)"));
    }

    #[test]
    fn missing_ratio_is_no_data() {
        let summary = AuditSummary::new(3.0, 1.0).with_audit_ratio(None);
        let outcome = render_audit_donut(Some(&summary), &spec()).expect("render");
        assert_eq!(outcome.empty_reason(), Some(EmptyReason::NoData));
    }

    #[test]
    fn negative_totals_are_rejected() {
        let summary = AuditSummary::new(-1.0, 2.0).with_audit_ratio(Some(0.5));
        assert!(render_audit_donut(Some(&summary), &spec()).is_err());
    }
}

use tracing::debug;

use crate::aggregate::{XpTransaction, project_xp_ranking};
use crate::charts::format::{format_xp_size, truncate_label};
use crate::charts::{ChartSpec, EmptyState, RenderOutcome};
use crate::error::ChartResult;
use crate::geometry::BarLayout;
use crate::interaction::PointHandle;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub const NO_PROJECT_XP: &str = "No project XP yet";
pub const ZERO_PROJECT_XP: &str = "No project has earned XP yet";

const NAME_ROTATION_DEG: f64 = -45.0;
const BAR_CORNER_PX: f64 = 2.0;

/// Top projects by summed XP as bottom-anchored bars.
///
/// Value labels sit inside bars taller than the configured threshold and
/// above shorter ones; names are truncated and rotated under each bar.
/// Records that hold no positive project XP leave nothing to rank and are
/// reported as `NoData`.
pub fn render_ranked_bar(records: &[XpTransaction], spec: &ChartSpec) -> ChartResult<RenderOutcome> {
    if records.is_empty() {
        return Ok(RenderOutcome::Empty(EmptyState::no_data(NO_PROJECT_XP)));
    }

    let tuning = &spec.tuning;
    let palette = &spec.palette;
    let ranking = project_xp_ranking(records, &tuning.bar_object_kind, tuning.top_n);
    let Some(max_total) = ranking.first().map(|entry| entry.total) else {
        debug!(records = records.len(), "no positive project xp");
        return Ok(RenderOutcome::Empty(EmptyState::no_data(ZERO_PROJECT_XP)));
    };

    let plot = spec.viewport.plot_area()?;
    let layout = BarLayout::fit(plot, ranking.len(), tuning.bar_spacing_px)?;
    let mut frame = RenderFrame::new(spec.viewport).with_line(LinePrimitive::new(
        plot.left,
        plot.bottom(),
        plot.right(),
        plot.bottom(),
        1.0,
        palette.axis,
    ));

    for (slot, entry) in ranking.iter().enumerate() {
        let bar = layout.bar(entry.total, max_total, slot)?;
        let value_label = format_xp_size(entry.total);

        let (value_y, value_color) = if bar.height > tuning.bar_label_inside_threshold_px {
            (bar.y + 15.0, palette.inverse_text)
        } else {
            (bar.y - 5.0, palette.text)
        };

        frame = frame
            .with_rect(
                RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, palette.bar)
                    .rounded(BAR_CORNER_PX),
            )
            .with_text(TextPrimitive::new(
                value_label.clone(),
                bar.center_x(),
                value_y,
                tuning.axis_font_px,
                value_color,
                TextHAlign::Center,
            ))
            .with_text(
                TextPrimitive::new(
                    truncate_label(
                        &entry.key,
                        tuning.label_limit,
                        tuning.label_keep,
                        &tuning.label_ellipsis,
                    ),
                    bar.center_x(),
                    bar.bottom() + 10.0,
                    tuning.axis_font_px,
                    palette.text,
                    TextHAlign::Right,
                )
                .rotated(NAME_ROTATION_DEG),
            )
            .with_handle(PointHandle::new(
                bar.center_x(),
                bar.y,
                bar.width / 2.0,
                entry.key.clone(),
                value_label,
            ));
    }

    debug!(bars = ranking.len(), max_total, "rendered ranked bars");
    Ok(RenderOutcome::Rendered(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, EmptyReason, default_viewport};

    fn spec() -> ChartSpec {
        ChartSpec::new(ChartKind::RankedBar, default_viewport())
    }

    #[test]
    fn non_project_records_give_no_data() {
        let records = vec![XpTransaction::new(400.0, "2024-01-01").with_object("quest", "exercise")];
        let outcome = render_ranked_bar(&records, &spec()).expect("render");
        assert_eq!(outcome.empty_reason(), Some(EmptyReason::NoData));
        let empty = outcome.empty_state().expect("empty state");
        assert_eq!(empty.message, ZERO_PROJECT_XP);
    }

    #[test]
    fn short_bars_get_their_label_above() {
        let records = vec![
            XpTransaction::new(100_000.0, "2024-01-01").with_object("big", "project"),
            XpTransaction::new(1_000.0, "2024-01-02").with_object("tiny", "project"),
        ];
        let outcome = render_ranked_bar(&records, &spec()).expect("render");
        let frame = outcome.frame().expect("frame");
        let tiny_bar = frame.rects[1];
        let tiny_label = frame
            .texts
            .iter()
            .find(|text| text.text == "1.0kB")
            .expect("value label");
        assert!(tiny_label.y < tiny_bar.y);
        assert!(frame.text_values().any(|text| text == "100.0kB"));
    }
}

//! Chart renderers.
//!
//! Every renderer is a pure function `(records, &ChartSpec) -> RenderOutcome`.
//! Guards run once per call in a fixed order: no data, then zero magnitude,
//! then the full visual. Empty states are values, never errors.

pub mod axis;
pub mod cumulative;
pub mod donut;
pub mod format;
pub mod radar;
pub mod ranked_bar;
pub mod trend;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    AuditSummary, ResultRecord, SKILL_PREFIX, SkillTransaction, TOP_N, XpTransaction,
};
use crate::core::{Padding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipConfig;
use crate::render::{Color, RenderFrame};

pub use cumulative::render_cumulative;
pub use donut::{DonutVariant, render_audit_donut, render_pass_fail_donut};
pub use radar::render_radar;
pub use ranked_bar::render_ranked_bar;
pub use trend::{render_trend, trend_title};

/// Chart family tag; one renderer per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    CumulativeSeries,
    RatioDonut,
    RankedBar,
    Radar,
    ScatterTrend,
}

impl ChartKind {
    pub const ALL: [Self; 5] = [
        Self::CumulativeSeries,
        Self::RatioDonut,
        Self::RankedBar,
        Self::Radar,
        Self::ScatterTrend,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CumulativeSeries => "cumulative-series",
            Self::RatioDonut => "ratio-donut",
            Self::RankedBar => "ranked-bar",
            Self::Radar => "radar",
            Self::ScatterTrend => "scatter-trend",
        }
    }
}

/// Record filter applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChartFilter {
    /// Inclusive on both ends; a missing end is unbounded.
    DateRange {
        #[serde(default)]
        from: Option<DateTime<Utc>>,
        #[serde(default)]
        to: Option<DateTime<Utc>>,
    },
    /// Trailing window of `days` ending at `now`.
    DaysBack { days: u32, now: DateTime<Utc> },
}

impl ChartFilter {
    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        match self {
            Self::DateRange { from, to } => {
                from.is_none_or(|from| time >= from) && to.is_none_or(|to| time <= to)
            }
            Self::DaysBack { days, now } => match Self::window_start(days, now) {
                Some(start) => time >= start,
                None => true,
            },
        }
    }

    /// First admitted instant of a `DaysBack` window; `None` when the window
    /// reaches past the representable range and is therefore unbounded.
    fn window_start(days: u32, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::try_days(i64::from(days)).and_then(|span| now.checked_sub_signed(span))
    }

    #[must_use]
    pub fn window_days(self) -> Option<u32> {
        match self {
            Self::DaysBack { days, .. } => Some(days),
            Self::DateRange { .. } => None,
        }
    }
}

/// Colors used by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub line: Color,
    pub area_fill: Color,
    pub marker: Color,
    pub pass: Color,
    pub fail: Color,
    pub up: Color,
    pub down: Color,
    pub bar: Color,
    pub grid: Color,
    pub axis: Color,
    pub text: Color,
    pub muted_text: Color,
    pub inverse_text: Color,
    pub radar_fill: Color,
    pub radar_stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0xff, 0xff, 0xff),
            line: Color::from_rgb8(0x66, 0x7e, 0xea),
            area_fill: Color::from_rgb8(0x66, 0x7e, 0xea).with_alpha(0.2),
            marker: Color::from_rgb8(0x4a, 0x90, 0xe2),
            pass: Color::from_rgb8(0x48, 0xbb, 0x78),
            fail: Color::from_rgb8(0xf5, 0x65, 0x65),
            up: Color::from_rgb8(0x4a, 0x90, 0xe2),
            down: Color::from_rgb8(0xe9, 0x4e, 0x77),
            bar: Color::from_rgb8(0x4a, 0x90, 0xe2),
            grid: Color::from_rgb8(0xdd, 0xdd, 0xdd),
            axis: Color::from_rgb8(0x33, 0x33, 0x33),
            text: Color::from_rgb8(0x33, 0x33, 0x33),
            muted_text: Color::from_rgb8(0x66, 0x66, 0x66),
            inverse_text: Color::from_rgb8(0xff, 0xff, 0xff),
            radar_fill: Color::from_rgb8(0x50, 0xe3, 0xc2).with_alpha(0.4),
            radar_stroke: Color::from_rgb8(0x50, 0xe3, 0xc2),
        }
    }
}

impl Palette {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.line,
            self.area_fill,
            self.marker,
            self.pass,
            self.fail,
            self.up,
            self.down,
            self.bar,
            self.grid,
            self.axis,
            self.text,
            self.muted_text,
            self.inverse_text,
            self.radar_fill,
            self.radar_stroke,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Layout constants shared by the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTuning {
    pub y_tick_intervals: usize,
    pub max_x_labels: usize,
    pub trend_y_gridlines: usize,
    pub trend_x_ticks: usize,
    pub top_n: usize,
    pub bar_object_kind: String,
    pub bar_spacing_px: f64,
    pub bar_label_inside_threshold_px: f64,
    pub label_limit: usize,
    pub label_keep: usize,
    pub label_ellipsis: String,
    pub radar_rings: usize,
    pub radar_max_radius_px: f64,
    pub radar_label_offset_px: f64,
    pub skill_prefix: String,
    pub pass_threshold: f64,
    pub grade_ceiling: f64,
    pub donut_radius_px: f64,
    pub donut_stroke_px: f64,
    pub marker_radius_px: f64,
    pub hover_radius_px: f64,
    pub tooltip_char_width_px: f64,
    pub tooltip_height_px: f64,
    pub axis_font_px: f64,
    pub label_font_px: f64,
    pub center_font_px: f64,
}

impl Default for ChartTuning {
    fn default() -> Self {
        Self {
            y_tick_intervals: 4,
            max_x_labels: 6,
            trend_y_gridlines: 5,
            trend_x_ticks: 5,
            top_n: TOP_N,
            bar_object_kind: "project".to_owned(),
            bar_spacing_px: 5.0,
            bar_label_inside_threshold_px: 15.0,
            label_limit: 15,
            label_keep: 12,
            label_ellipsis: "...".to_owned(),
            radar_rings: 5,
            radar_max_radius_px: 130.0,
            radar_label_offset_px: 18.0,
            skill_prefix: SKILL_PREFIX.to_owned(),
            pass_threshold: 1.0,
            grade_ceiling: 1.5,
            donut_radius_px: 100.0,
            donut_stroke_px: 50.0,
            marker_radius_px: 4.0,
            hover_radius_px: 6.0,
            tooltip_char_width_px: 6.0,
            tooltip_height_px: 20.0,
            axis_font_px: 11.0,
            label_font_px: 12.0,
            center_font_px: 24.0,
        }
    }
}

impl ChartTuning {
    pub fn validate(&self) -> ChartResult<()> {
        let positive = [
            ("radar_max_radius_px", self.radar_max_radius_px),
            ("donut_radius_px", self.donut_radius_px),
            ("donut_stroke_px", self.donut_stroke_px),
            ("marker_radius_px", self.marker_radius_px),
            ("hover_radius_px", self.hover_radius_px),
            ("tooltip_char_width_px", self.tooltip_char_width_px),
            ("tooltip_height_px", self.tooltip_height_px),
            ("axis_font_px", self.axis_font_px),
            ("label_font_px", self.label_font_px),
            ("center_font_px", self.center_font_px),
            ("grade_ceiling", self.grade_ceiling),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "tuning `{name}` must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("bar_spacing_px", self.bar_spacing_px),
            ("bar_label_inside_threshold_px", self.bar_label_inside_threshold_px),
            ("radar_label_offset_px", self.radar_label_offset_px),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "tuning `{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.pass_threshold.is_finite() {
            return Err(ChartError::InvalidData(
                "tuning `pass_threshold` must be finite".to_owned(),
            ));
        }
        if self.top_n == 0 {
            return Err(ChartError::InvalidData(
                "tuning `top_n` must be > 0".to_owned(),
            ));
        }
        if self.label_keep > self.label_limit {
            return Err(ChartError::InvalidData(
                "tuning `label_keep` must not exceed `label_limit`".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn tooltip_config(&self) -> TooltipConfig {
        TooltipConfig {
            hover_radius: self.hover_radius_px,
            char_width_px: self.tooltip_char_width_px,
            box_height_px: self.tooltip_height_px,
            ..TooltipConfig::default()
        }
    }
}

/// Everything a renderer needs besides the records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub viewport: Viewport,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub filter: Option<ChartFilter>,
    #[serde(default)]
    pub tuning: ChartTuning,
}

impl ChartSpec {
    #[must_use]
    pub fn new(kind: ChartKind, viewport: Viewport) -> Self {
        Self {
            kind,
            viewport,
            palette: Palette::default(),
            filter: None,
            tuning: ChartTuning::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ChartFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: ChartTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// `true` when a record stamped `time` passes the filter.
    ///
    /// Without a filter every record passes, undated ones included.
    #[must_use]
    pub fn admits(&self, time: Option<DateTime<Utc>>) -> bool {
        match self.filter {
            None => true,
            Some(filter) => time.is_some_and(|time| filter.contains(time)),
        }
    }
}

/// Dashboard default: 550 x 350 with 45 px of padding on every side.
#[must_use]
pub fn default_viewport() -> Viewport {
    Viewport::new(550, 350).with_padding(Padding::uniform(45.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyReason {
    NoData,
    ZeroMagnitude,
    /// The chart could not be laid out, e.g. a viewport with no usable area.
    Unrenderable,
}

/// Placeholder shown in place of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub reason: EmptyReason,
    pub message: String,
}

impl EmptyState {
    #[must_use]
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            reason: EmptyReason::NoData,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn zero_magnitude(message: impl Into<String>) -> Self {
        Self {
            reason: EmptyReason::ZeroMagnitude,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unrenderable(message: impl Into<String>) -> Self {
        Self {
            reason: EmptyReason::Unrenderable,
            message: message.into(),
        }
    }
}

/// Result of one render call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(RenderFrame),
    Empty(EmptyState),
}

impl RenderOutcome {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        match self {
            Self::Rendered(frame) => Some(frame),
            Self::Empty(_) => None,
        }
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            Self::Rendered(_) => None,
            Self::Empty(state) => Some(state),
        }
    }

    #[must_use]
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        self.empty_state().map(|state| state.reason)
    }
}

/// Records for one chart, tagged by shape.
#[derive(Debug, Clone, Copy)]
pub enum ChartData<'a> {
    Xp(&'a [XpTransaction]),
    Audit(Option<&'a AuditSummary>),
    Results(&'a [ResultRecord]),
    Skills(&'a [SkillTransaction]),
}

impl ChartData<'_> {
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Xp(_) => "xp transactions",
            Self::Audit(_) => "audit summary",
            Self::Results(_) => "results",
            Self::Skills(_) => "skill transactions",
        }
    }
}

/// Routes `data` to the renderer selected by `spec.kind`.
///
/// Ratio donuts render audits or pass/fail tallies depending on the data.
pub fn render_chart(data: ChartData<'_>, spec: &ChartSpec) -> ChartResult<RenderOutcome> {
    match (spec.kind, data) {
        (ChartKind::CumulativeSeries, ChartData::Xp(records)) => render_cumulative(records, spec),
        (ChartKind::RankedBar, ChartData::Xp(records)) => render_ranked_bar(records, spec),
        (ChartKind::RatioDonut, ChartData::Audit(summary)) => render_audit_donut(summary, spec),
        (ChartKind::RatioDonut, ChartData::Results(results)) => {
            render_pass_fail_donut(results, spec)
        }
        (ChartKind::ScatterTrend, ChartData::Results(results)) => render_trend(results, spec),
        (ChartKind::Radar, ChartData::Skills(records)) => render_radar(records, spec),
        (kind, data) => Err(ChartError::InvalidData(format!(
            "{} chart cannot render {}",
            kind.as_str(),
            data.shape_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).single().expect("time")
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ChartFilter::DateRange {
            from: Some(at(2)),
            to: Some(at(4)),
        };
        assert!(!filter.contains(at(1)));
        assert!(filter.contains(at(2)));
        assert!(filter.contains(at(4)));
        assert!(!filter.contains(at(5)));
    }

    #[test]
    fn days_back_window_starts_relative_to_now() {
        let filter = ChartFilter::DaysBack {
            days: 3,
            now: at(10),
        };
        assert!(filter.contains(at(7)));
        assert!(!filter.contains(at(6)));
        assert_eq!(filter.window_days(), Some(3));
    }

    #[test]
    fn oversized_days_back_window_admits_every_instant() {
        let filter = ChartFilter::DaysBack {
            days: u32::MAX,
            now: at(10),
        };
        assert!(filter.contains(at(1)));
        assert!(filter.contains(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn mismatched_data_is_rejected() {
        let spec = ChartSpec::new(ChartKind::Radar, default_viewport());
        assert!(render_chart(ChartData::Xp(&[]), &spec).is_err());
    }

    #[test]
    fn default_tuning_is_valid() {
        ChartTuning::default().validate().expect("tuning");
        Palette::default().validate().expect("palette");
    }
}

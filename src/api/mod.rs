//! Engine facade: one entry point per dashboard chart.
//!
//! Each entry point builds an explicit `ChartSpec` from the engine config, runs
//! the pure renderer, wraps the outcome in a titled card, hands the card to
//! the backend and returns the card together with a fresh interaction state.
//! Layout failures never reach the caller; they become empty-state cards.

mod engine_config;
mod json_contract;

pub use engine_config::{CardTitles, ChartEngineConfig};
pub use json_contract::{decode_audit_summary, decode_records, decode_records_str};

use tracing::{debug, warn};

use crate::aggregate::{AuditSummary, ResultRecord, SkillTransaction, XpTransaction};
use crate::charts::{
    ChartData, ChartFilter, ChartKind, ChartSpec, EmptyState, RenderOutcome, render_chart,
    trend_title,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::{ChartCard, Renderer};

pub const VIEWPORT_TOO_SMALL: &str = "Chart area is too small to render.";
pub const DATA_NOT_RENDERABLE: &str = "Chart data could not be rendered.";

/// One rendered chart: its card and the interaction state bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub kind: ChartKind,
    pub card: ChartCard,
    pub interaction: InteractionState,
}

impl ChartInstance {
    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        self.card.is_empty_state()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.card.title
    }
}

pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    cards_rendered: usize,
}

impl<R: Renderer> ChartEngine<R> {
    /// Validates palette and tuning. A viewport without a usable area is
    /// accepted and surfaces later as empty-state cards.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.palette.validate()?;
        config.tuning.validate()?;
        Ok(Self {
            renderer,
            config,
            cards_rendered: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn cards_rendered(&self) -> usize {
        self.cards_rendered
    }

    /// Running XP total, optionally limited to a date range.
    pub fn cumulative_xp(
        &mut self,
        records: &[XpTransaction],
        filter: Option<ChartFilter>,
    ) -> ChartResult<ChartInstance> {
        let spec = self
            .config
            .spec_with_filter(ChartKind::CumulativeSeries, filter);
        let title = self.config.titles.cumulative_xp.clone();
        self.render(title, ChartData::Xp(records), &spec)
    }

    pub fn audit_ratio(&mut self, summary: Option<&AuditSummary>) -> ChartResult<ChartInstance> {
        let spec = self.config.spec_for(ChartKind::RatioDonut);
        let title = self.config.titles.audit_ratio.clone();
        self.render(title, ChartData::Audit(summary), &spec)
    }

    pub fn pass_fail(&mut self, results: &[ResultRecord]) -> ChartResult<ChartInstance> {
        let spec = self.config.spec_for(ChartKind::RatioDonut);
        let title = self.config.titles.pass_fail.clone();
        self.render(title, ChartData::Results(results), &spec)
    }

    pub fn top_projects(&mut self, records: &[XpTransaction]) -> ChartResult<ChartInstance> {
        let spec = self.config.spec_for(ChartKind::RankedBar);
        let title = self.config.titles.top_projects.clone();
        self.render(title, ChartData::Xp(records), &spec)
    }

    pub fn skills_radar(&mut self, records: &[SkillTransaction]) -> ChartResult<ChartInstance> {
        let spec = self.config.spec_for(ChartKind::Radar);
        let title = self.config.titles.skills.clone();
        self.render(title, ChartData::Skills(records), &spec)
    }

    /// Passing results over time; the title names the window.
    pub fn progress_trend(
        &mut self,
        results: &[ResultRecord],
        filter: Option<ChartFilter>,
    ) -> ChartResult<ChartInstance> {
        let spec = self.config.spec_with_filter(ChartKind::ScatterTrend, filter);
        let title = trend_title(spec.filter.as_ref());
        self.render(title, ChartData::Results(results), &spec)
    }

    /// Generic entry point for callers that build their own spec.
    pub fn render(
        &mut self,
        title: impl Into<String>,
        data: ChartData<'_>,
        spec: &ChartSpec,
    ) -> ChartResult<ChartInstance> {
        let outcome = soften(spec.kind, render_chart(data, spec))?;
        if let RenderOutcome::Empty(state) = &outcome {
            debug!(
                kind = spec.kind.as_str(),
                reason = ?state.reason,
                message = %state.message,
                "chart rendered as empty state"
            );
        }

        let card = ChartCard::wrap(title, spec.viewport, outcome, spec.palette.muted_text);
        self.renderer.render(&card)?;
        self.cards_rendered += 1;

        let interaction = InteractionState::new(
            card.body.handles.clone(),
            spec.viewport,
            spec.tuning.tooltip_config(),
        );
        Ok(ChartInstance {
            kind: spec.kind,
            card,
            interaction,
        })
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn soften(kind: ChartKind, result: ChartResult<RenderOutcome>) -> ChartResult<RenderOutcome> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(err @ ChartError::InvalidViewport { .. }) => {
            warn!(kind = kind.as_str(), error = %err, "chart does not fit its viewport");
            Ok(RenderOutcome::Empty(EmptyState::unrenderable(VIEWPORT_TOO_SMALL)))
        }
        Err(err @ ChartError::InvalidData(_)) => {
            warn!(kind = kind.as_str(), error = %err, "chart data could not be laid out");
            Ok(RenderOutcome::Empty(EmptyState::unrenderable(DATA_NOT_RENDERABLE)))
        }
        Err(err) => Err(err),
    }
}

use serde::{Deserialize, Serialize};

use crate::charts::{
    ChartFilter, ChartKind, ChartSpec, ChartTuning, Palette, default_viewport,
};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Fixed outer titles of the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTitles {
    #[serde(default = "default_cumulative_title")]
    pub cumulative_xp: String,
    #[serde(default = "default_audit_title")]
    pub audit_ratio: String,
    #[serde(default = "default_pass_fail_title")]
    pub pass_fail: String,
    #[serde(default = "default_top_projects_title")]
    pub top_projects: String,
    #[serde(default = "default_skills_title")]
    pub skills: String,
}

impl Default for CardTitles {
    fn default() -> Self {
        Self {
            cumulative_xp: default_cumulative_title(),
            audit_ratio: default_audit_title(),
            pass_fail: default_pass_fail_title(),
            top_projects: default_top_projects_title(),
            skills: default_skills_title(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host dashboards can persist their chart setup; every field
/// falls back to the stock dashboard look when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub tuning: ChartTuning,
    #[serde(default)]
    pub titles: CardTitles,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            palette: Palette::default(),
            tuning: ChartTuning::default(),
            titles: CardTitles::default(),
        }
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

    #[must_use]
    pub fn with_titles(mut self, titles: CardTitles) -> Self {
        self.titles = titles;
        self
    }

    /// Rejects viewports without a drawable area and invalid tuning values.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.palette.validate()?;
        self.tuning.validate()
    }

    /// Explicit per-render configuration for one chart kind.
    #[must_use]
    pub fn spec_for(&self, kind: ChartKind) -> ChartSpec {
        ChartSpec::new(kind, self.viewport)
            .with_palette(self.palette)
            .with_tuning(self.tuning.clone())
    }

    #[must_use]
    pub fn spec_with_filter(&self, kind: ChartKind, filter: Option<ChartFilter>) -> ChartSpec {
        let mut spec = self.spec_for(kind);
        spec.filter = filter;
        spec
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_cumulative_title() -> String {
    "Cumulative XP Over Time".to_owned()
}

fn default_audit_title() -> String {
    "Audit Ratio (Up vs. Down)".to_owned()
}

fn default_pass_fail_title() -> String {
    "Project Pass/Fail Ratio".to_owned()
}

fn default_top_projects_title() -> String {
    "Top 10 Project XP (kB)".to_owned()
}

fn default_skills_title() -> String {
    "Technical Skills Radar".to_owned()
}

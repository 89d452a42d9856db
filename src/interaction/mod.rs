//! Point-level interaction for one rendered chart instance.
//!
//! Each chart instance owns exactly one [`InteractionState`], which owns one
//! [`TooltipState`]. At most one tooltip is visible at a time: entering a new
//! point replaces the active one, leaving the active point hides it.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::Viewport;

/// Interactive anchor for one plotted point, with preformatted tooltip text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointHandle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub label: String,
    pub value: String,
    pub date: Option<String>,
}

impl PointHandle {
    #[must_use]
    pub fn new(
        x: f64,
        y: f64,
        radius: f64,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            radius,
            label: label.into(),
            value: value.into(),
            date: None,
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Tooltip text: `label | value | date`.
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        let mut parts: SmallVec<[&str; 3]> = SmallVec::new();
        parts.push(&self.label);
        parts.push(&self.value);
        if let Some(date) = &self.date {
            parts.push(date);
        }
        parts.join(" | ")
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Full metadata surfaced when a point is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetails {
    pub index: usize,
    pub label: String,
    pub value: String,
    pub date: Option<String>,
}

/// Marker sizes and tooltip box metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub hover_radius: f64,
    pub hit_slop_px: f64,
    pub char_width_px: f64,
    pub box_height_px: f64,
    pub box_padding_px: f64,
    pub offset_px: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            hover_radius: 6.0,
            hit_slop_px: 4.0,
            char_width_px: 6.0,
            box_height_px: 20.0,
            box_padding_px: 5.0,
            offset_px: 10.0,
        }
    }
}

/// Visible tooltip box, already clamped to the chart bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTooltip {
    pub point_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    active: Option<ActiveTooltip>,
}

impl TooltipState {
    #[must_use]
    pub fn active(&self) -> Option<&ActiveTooltip> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|tooltip| tooltip.point_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    handles: Vec<PointHandle>,
    viewport: Viewport,
    config: TooltipConfig,
    tooltip: TooltipState,
}

impl InteractionState {
    #[must_use]
    pub fn new(handles: Vec<PointHandle>, viewport: Viewport, config: TooltipConfig) -> Self {
        Self {
            handles,
            viewport,
            config,
            tooltip: TooltipState::default(),
        }
    }

    #[must_use]
    pub fn handles(&self) -> &[PointHandle] {
        &self.handles
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Current marker radius: enlarged while the point is active.
    #[must_use]
    pub fn marker_radius(&self, index: usize) -> Option<f64> {
        let handle = self.handles.get(index)?;
        if self.tooltip.active_index() == Some(index) {
            Some(self.config.hover_radius.max(handle.radius))
        } else {
            Some(handle.radius)
        }
    }

    /// Activates `index`, replacing any other active tooltip.
    ///
    /// Unknown indices leave the state untouched.
    pub fn on_point_enter(&mut self, index: usize) -> Option<&ActiveTooltip> {
        let handle = self.handles.get(index)?;
        let tooltip = self.layout_tooltip(index, handle);
        trace!(index, "tooltip enter");
        self.tooltip.active = Some(tooltip);
        self.tooltip.active.as_ref()
    }

    /// Hides the tooltip if `index` is the active point.
    pub fn on_point_leave(&mut self, index: usize) {
        if self.tooltip.active_index() == Some(index) {
            trace!(index, "tooltip leave");
            self.tooltip.active = None;
        }
    }

    /// Pointer left the chart surface.
    pub fn on_pointer_exit(&mut self) {
        self.tooltip.active = None;
    }

    /// Drives enter/leave transitions from a raw pointer position.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<&ActiveTooltip> {
        let hit = self.hit_test(x, y);
        match (self.tooltip.active_index(), hit) {
            (Some(active), Some(hit)) if active == hit => {}
            (Some(active), None) => self.on_point_leave(active),
            (_, Some(hit)) => {
                self.on_point_enter(hit);
            }
            (None, None) => {}
        }
        self.tooltip.active()
    }

    /// Read-only: clicking never changes tooltip or marker state.
    #[must_use]
    pub fn on_point_click(&self, index: usize) -> Option<PointDetails> {
        self.handles.get(index).map(|handle| PointDetails {
            index,
            label: handle.label.clone(),
            value: handle.value.clone(),
            date: handle.date.clone(),
        })
    }

    /// Nearest handle whose marker (plus slop) contains the position.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.handles
            .iter()
            .enumerate()
            .filter_map(|(index, handle)| {
                let distance = handle.distance_to(x, y);
                let reach = handle.radius.max(self.config.hover_radius) + self.config.hit_slop_px;
                (distance <= reach).then_some((OrderedFloat(distance), index))
            })
            .min()
            .map(|(_, index)| index)
    }

    fn layout_tooltip(&self, index: usize, handle: &PointHandle) -> ActiveTooltip {
        let text = handle.tooltip_text();
        let width = text.chars().count() as f64 * self.config.char_width_px
            + 2.0 * self.config.box_padding_px;
        let height = self.config.box_height_px;

        let max_x = (f64::from(self.viewport.width) - width).max(0.0);
        let max_y = (f64::from(self.viewport.height) - height).max(0.0);
        let x = (handle.x + self.config.offset_px).clamp(0.0, max_x);
        let y = (handle.y - self.config.offset_px - height).clamp(0.0, max_y);

        ActiveTooltip {
            point_index: index,
            text,
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InteractionState {
        InteractionState::new(
            vec![
                PointHandle::new(50.0, 50.0, 4.0, "A", "10 XP").with_date("2024-01-01"),
                PointHandle::new(540.0, 5.0, 4.0, "B", "20 XP").with_date("2024-01-02"),
            ],
            Viewport::new(550, 350),
            TooltipConfig::default(),
        )
    }

    #[test]
    fn entering_new_point_replaces_active_tooltip() {
        let mut state = state();
        state.on_point_enter(0);
        state.on_point_enter(1);
        assert_eq!(state.tooltip().active_index(), Some(1));
        assert_eq!(state.marker_radius(0), Some(4.0));
        assert_eq!(state.marker_radius(1), Some(6.0));
    }

    #[test]
    fn leaving_inactive_point_keeps_tooltip() {
        let mut state = state();
        state.on_point_enter(0);
        state.on_point_leave(1);
        assert!(state.tooltip().is_visible());
        state.on_point_leave(0);
        assert!(!state.tooltip().is_visible());
    }

    #[test]
    fn tooltip_is_clamped_inside_bounds() {
        let mut state = state();
        let tooltip = state.on_point_enter(1).expect("tooltip").clone();
        assert!(tooltip.x + tooltip.width <= 550.0 + 1e-9);
        assert!(tooltip.y >= 0.0);
        assert_eq!(tooltip.text, "B | 20 XP | 2024-01-02");
    }

    #[test]
    fn pointer_move_drives_enter_and_leave() {
        let mut state = state();
        assert!(state.on_pointer_move(52.0, 51.0).is_some());
        assert_eq!(state.tooltip().active_index(), Some(0));
        assert!(state.on_pointer_move(300.0, 300.0).is_none());
    }

    #[test]
    fn click_is_read_only() {
        let mut state = state();
        state.on_point_enter(0);
        let before = state.clone();
        let details = state.on_point_click(1).expect("details");
        assert_eq!(details.label, "B");
        assert_eq!(details.date.as_deref(), Some("2024-01-02"));
        assert_eq!(state, before);
    }
}

use crate::charts::{EmptyState, RenderOutcome};
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, TextHAlign, TextPrimitive};

const MESSAGE_FONT_PX: f64 = 14.0;

/// What a card shows below its title.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    Visual,
    Message(EmptyState),
}

/// Titled container sized to a viewport.
///
/// `body` is always the frame to paint: the chart itself, or a frame holding
/// the empty-state message centered in the same area, so both states keep the
/// same outer shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartCard {
    pub title: String,
    pub viewport: Viewport,
    pub content: CardContent,
    pub body: RenderFrame,
}

impl ChartCard {
    #[must_use]
    pub fn wrap(
        title: impl Into<String>,
        viewport: Viewport,
        outcome: RenderOutcome,
        message_color: Color,
    ) -> Self {
        match outcome {
            RenderOutcome::Rendered(frame) => Self::visual(title, frame),
            RenderOutcome::Empty(state) => Self::message(title, viewport, state, message_color),
        }
    }

    #[must_use]
    pub fn visual(title: impl Into<String>, frame: RenderFrame) -> Self {
        Self {
            title: title.into(),
            viewport: frame.viewport,
            content: CardContent::Visual,
            body: frame,
        }
    }

    #[must_use]
    pub fn message(
        title: impl Into<String>,
        viewport: Viewport,
        state: EmptyState,
        color: Color,
    ) -> Self {
        let body = RenderFrame::new(viewport).with_text(TextPrimitive::new(
            state.message.clone(),
            f64::from(viewport.width) / 2.0,
            f64::from(viewport.height) / 2.0,
            MESSAGE_FONT_PX,
            color,
            TextHAlign::Center,
        ));
        Self {
            title: title.into(),
            viewport,
            content: CardContent::Message(state),
            body,
        }
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<&EmptyState> {
        match &self.content {
            CardContent::Message(state) => Some(state),
            CardContent::Visual => None,
        }
    }

    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        self.empty_state().is_some()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.title.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "card title must not be empty".to_owned(),
            ));
        }
        match self.content {
            CardContent::Visual => self.body.validate(),
            // Message cards may wrap a viewport too small for a plot area.
            CardContent::Message(_) => self.body.texts.iter().try_for_each(TextPrimitive::validate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::EmptyReason;

    #[test]
    fn message_card_keeps_viewport_and_centers_text() {
        let viewport = Viewport::new(550, 350);
        let card = ChartCard::wrap(
            "XP Progress",
            viewport,
            RenderOutcome::Empty(EmptyState::no_data("No XP data yet")),
            Color::rgb(0.4, 0.4, 0.4),
        );
        assert_eq!(card.viewport, viewport);
        assert_eq!(card.empty_state().map(|state| state.reason), Some(EmptyReason::NoData));
        assert_eq!(card.body.texts.len(), 1);
        assert_eq!(card.body.texts[0].x, 275.0);
        card.validate().expect("valid card");
    }
}

use crate::error::ChartResult;
use crate::render::{ChartCard, Renderer};

/// Headless renderer used by tests and server-side callers.
///
/// It still validates every card so invalid geometry surfaces without a real
/// surface attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub cards_rendered: usize,
    pub empty_cards: usize,
    pub last_title: Option<String>,
    pub last_primitive_count: usize,
    pub last_handle_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, card: &ChartCard) -> ChartResult<()> {
        card.validate()?;
        self.cards_rendered += 1;
        if card.is_empty_state() {
            self.empty_cards += 1;
        }
        self.last_title = Some(card.title.clone());
        self.last_primitive_count = card.body.primitive_count();
        self.last_handle_count = card.body.handles.len();
        Ok(())
    }
}

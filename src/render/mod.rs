mod card;
mod frame;
mod null_renderer;
mod primitives;
mod svg;

pub use card::{CardContent, ChartCard};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, PolygonPrimitive, RectPrimitive, Stroke,
    TextHAlign, TextPrimitive,
};
pub use svg::{SvgRenderStats, SvgRenderer, TITLE_BAND_PX, escape_xml};

use crate::error::ChartResult;

/// Contract implemented by any display surface.
///
/// Backends receive a finished, titled `ChartCard`; they never see records,
/// scales or interaction state.
pub trait Renderer {
    fn render(&mut self, card: &ChartCard) -> ChartResult<()>;
}

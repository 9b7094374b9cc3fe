mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, RectPrimitive, TextAlign, TextPrimitive};

use crate::error::HistogramResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` exported from the live
/// scene nodes, so drawing code stays isolated from binning and reconciliation.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> HistogramResult<()>;
}

use crate::core::Viewport;
use crate::error::{HistogramError, HistogramResult};
use crate::render::{RectPrimitive, TextPrimitive};

/// Draw primitives exported from one histogram series.
///
/// Backends draw `bars` in stored order, then `highlight`, then `labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub series_id: String,
    pub bars: Vec<RectPrimitive>,
    pub highlight: Option<RectPrimitive>,
    pub labels: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, series_id: impl Into<String>) -> Self {
        Self {
            viewport,
            series_id: series_id.into(),
            bars: Vec::new(),
            highlight: None,
            labels: Vec::new(),
        }
    }

    /// Bars followed by the highlight overlay, in draw order.
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.bars.iter().chain(self.highlight.iter())
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.bars.len() + usize::from(self.highlight.is_some())
    }

    pub fn validate(&self) -> HistogramResult<()> {
        if !self.viewport.is_valid() {
            return Err(HistogramError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.rects().try_for_each(RectPrimitive::validate)?;
        self.labels.iter().try_for_each(TextPrimitive::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rect_count() == 0 && self.labels.is_empty()
    }
}

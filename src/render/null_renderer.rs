use crate::error::HistogramResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that validates frames and records what it was given.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_series_id: Option<String>,
    pub last_bar_count: usize,
    pub last_label_count: usize,
    pub last_had_highlight: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> HistogramResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_series_id = Some(frame.series_id.clone());
        self.last_bar_count = frame.bars.len();
        self.last_label_count = frame.labels.len();
        self.last_had_highlight = frame.highlight.is_some();
        Ok(())
    }
}

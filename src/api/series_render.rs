use tracing::debug;

use crate::core::{BinRecord, Viewport};
use crate::error::HistogramResult;
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextPrimitive};
use crate::scene::{RectNode, TextNode};

use super::HistogramSeries;

fn rect_primitive(node: &RectNode) -> RectPrimitive {
    let (mut x1, mut y1) = (node.x, node.y);
    let (mut x2, mut y2) = (node.x + node.width, node.y + node.height);
    if node.crisp {
        // Snap edges, not sizes, so adjacent bars stay flush.
        (x1, y1, x2, y2) = (x1.round(), y1.round(), x2.round(), y2.round());
    }
    let mut rect = RectPrimitive::from_corners(x1, y1, x2, y2);
    rect.fill = node.fill.map(|fill| fill.with_opacity(node.fill_opacity));
    rect.stroke = node
        .stroke
        .map(|stroke| stroke.with_opacity(node.stroke_opacity));
    rect.stroke_width = node.stroke_width;
    rect.line_dash = node.line_dash.to_vec();
    rect.line_dash_offset = node.line_dash_offset;
    rect
}

fn text_primitive(node: &TextNode) -> TextPrimitive {
    TextPrimitive {
        text: node.text.clone(),
        x: node.x,
        y: node.y,
        font_size: node.font_size,
        font_family: node.font_family.clone(),
        font_style: node.font_style,
        font_weight: node.font_weight,
        fill: node.fill.unwrap_or(Color::BLACK),
        align: node.text_align,
        baseline: node.text_baseline,
    }
}

fn is_drawable(node: &RectNode) -> bool {
    node.visible
        && node.x.is_finite()
        && node.y.is_finite()
        && node.width.is_finite()
        && node.height.is_finite()
}

impl<T: BinRecord + 'static> HistogramSeries<T> {
    /// Exports visible live nodes as draw primitives.
    ///
    /// Bars draw in z-index order, then the highlighted bar, then labels.
    /// A hidden series exports an empty frame.
    #[must_use]
    pub fn render_frame(&self, viewport: Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport, self.id.as_str());
        if !self.config.visible {
            return frame;
        }

        let mut bars: Vec<&RectNode> = self.bars.nodes().filter(|node| is_drawable(node)).collect();
        bars.sort_by_key(|node| node.z_index);
        frame.bars = bars.into_iter().map(rect_primitive).collect();
        frame.highlight = self
            .highlight
            .nodes()
            .find(|node| is_drawable(node))
            .map(rect_primitive);
        frame.labels = self
            .labels
            .nodes()
            .filter(|node| node.visible && !node.text.is_empty())
            .map(text_primitive)
            .collect();
        frame
    }

    /// Exports the scene and hands it to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R, viewport: Viewport) -> HistogramResult<()> {
        let frame = self.render_frame(viewport);
        debug!(
            series = %self.id,
            bars = frame.bars.len(),
            highlighted = frame.highlight.is_some(),
            labels = frame.labels.len(),
            "rendering histogram frame"
        );
        renderer.render(&frame)
    }
}

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::BinRecord;
use crate::error::HistogramResult;
use crate::render::TextAlign;
use crate::scene::{
    JoinKey, JoinSummary, NodeTag, PointerEvents, RectNode, TextBaseline, TextNode,
};

use super::node_data::HistogramNodeDatum;
use super::{
    HighlightStyle, HistogramLabelConfig, HistogramSeries, HistogramStyle, InvalidationTopic,
    JoinMode, SeriesEvent,
};

/// Z-index given to the highlighted bar so it draws above every other bar.
pub const HIGHLIGHTED_Z_INDEX: i64 = 1_000_000_000_000;

/// Join counts of the three selections after one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionUpdate {
    pub bars: JoinSummary,
    pub labels: JoinSummary,
    pub highlight: JoinSummary,
}

impl SelectionUpdate {
    /// `true` when no node was created or destroyed in any selection.
    #[must_use]
    pub const fn is_pure_update(self) -> bool {
        self.bars.is_pure_update()
            && self.labels.is_pure_update()
            && self.highlight.is_pure_update()
    }
}

fn join_key(mode: JoinMode, datum: &HistogramNodeDatum) -> JoinKey {
    match mode {
        JoinMode::Positional => JoinKey::Position(datum.bin_index),
        JoinMode::ByBinDomain => JoinKey::from_domain(datum.domain),
    }
}

fn update_bar(
    node: &mut RectNode,
    datum: &HistogramNodeDatum,
    index: usize,
    style: &HistogramStyle,
    highlight: Option<&HighlightStyle>,
) {
    node.crisp = true;
    node.x = datum.x;
    node.y = datum.y;
    node.width = datum.width;
    node.height = datum.height;
    node.fill = highlight.and_then(|h| h.fill).or(datum.fill);
    node.stroke = highlight.and_then(|h| h.stroke).or(datum.stroke);
    node.fill_opacity = style.fill_opacity;
    node.stroke_opacity = style.stroke_opacity;
    node.stroke_width = highlight
        .and_then(|h| h.stroke_width)
        .unwrap_or(datum.stroke_width);
    node.line_dash.clone_from(&style.line_dash);
    node.line_dash_offset = style.line_dash_offset;
    node.fill_shadow = style.shadow;
    node.z_index = match highlight {
        Some(_) => HIGHLIGHTED_Z_INDEX,
        None => i64::try_from(index).unwrap_or(i64::MAX),
    };
    node.visible = datum.height > 0.0;
}

fn create_label(_datum: &HistogramNodeDatum, _index: usize) -> TextNode {
    let mut node = TextNode::new(NodeTag::Label);
    node.text_align = TextAlign::Center;
    node.text_baseline = TextBaseline::Middle;
    node.pointer_events = PointerEvents::None;
    node
}

fn update_label(node: &mut TextNode, datum: &HistogramNodeDatum, config: &HistogramLabelConfig) {
    let label = datum.label.as_ref().filter(|_| config.enabled);
    let Some(label) = label else {
        node.visible = false;
        return;
    };

    node.text.clone_from(&label.text);
    node.x = label.x;
    node.y = label.y;
    node.font_style = label.font_style;
    node.font_weight = label.font_weight;
    node.font_size = label.font_size;
    node.font_family.clone_from(&label.font_family);
    node.fill = Some(label.fill);
    node.visible = label.x.is_finite() && label.y.is_finite();
}

impl<T: BinRecord + 'static> HistogramSeries<T> {
    /// Reconciles bar, label and highlight nodes with the current node data.
    ///
    /// Running it twice on unchanged node data creates and destroys nothing.
    pub fn update_selection(&mut self) -> HistogramResult<SelectionUpdate> {
        let mode = self.config.join_mode;
        let style = &self.config.style;
        let label_config = &self.config.label;
        let node_data = &self.node_data;

        let bars = self.bars.join(
            node_data,
            |_, datum| join_key(mode, datum),
            |_, _| RectNode::new(NodeTag::Bin),
            drop,
        )?;
        self.bars.each(node_data, |node, datum, index| {
            update_bar(node, datum, index, style, None);
        });

        let labels = self.labels.join(
            node_data,
            |_, datum| join_key(mode, datum),
            create_label,
            drop,
        )?;
        self.labels.each(node_data, |node, datum, _| {
            update_label(node, datum, label_config);
        });

        let highlighted: &[HistogramNodeDatum] = match self.highlighted {
            Some(index) => node_data.get(index..=index).unwrap_or(&[]),
            None => &[],
        };
        let highlight_style = &self.config.highlight_style;
        let highlight = self.highlight.join(
            highlighted,
            |_, datum| join_key(mode, datum),
            |_, _| RectNode::new(NodeTag::Bin),
            drop,
        )?;
        self.highlight.each(highlighted, |node, datum, index| {
            update_bar(node, datum, index, style, Some(highlight_style));
        });

        let update = SelectionUpdate {
            bars,
            labels,
            highlight,
        };
        self.invalidation = self.invalidation.without_topic(InvalidationTopic::Style);
        trace!(
            series = %self.id,
            bars = self.bars.len(),
            labels = self.labels.len(),
            highlighted = self.highlight.len(),
            "updated histogram selections"
        );
        self.emit(&SeriesEvent::SelectionUpdated { update });
        Ok(update)
    }

    /// Live bar nodes in bin order.
    pub fn bar_nodes(&self) -> impl Iterator<Item = &RectNode> + '_ {
        self.bars.nodes()
    }

    /// Live label nodes in bin order, hidden ones included.
    pub fn label_nodes(&self) -> impl Iterator<Item = &TextNode> + '_ {
        self.labels.nodes()
    }

    /// The highlighted bar node, when one is live.
    #[must_use]
    pub fn highlight_node(&self) -> Option<&RectNode> {
        self.highlight.node(0)
    }
}

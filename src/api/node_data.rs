use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BinDomain, HistogramBin, ValueToPixel};
use crate::render::Color;
use crate::scene::{FontStyle, FontWeight};

use super::label_format::{LabelFormatterFn, format_with};
use super::{HistogramLabelConfig, HistogramStyle};

/// Label placed at the centre of a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramLabelDatum {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
    pub font_size: f64,
    pub font_family: String,
    pub fill: Color,
}

/// Pixel-space description of one bar.
///
/// `bin_index` refers back to the bin of the same processing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramNodeDatum {
    pub bin_index: usize,
    pub domain: BinDomain,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub label: Option<HistogramLabelDatum>,
}

impl HistogramNodeDatum {
    /// Hit test against the bar rectangle, tolerant of negative extents.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (left, right) = ordered(self.x, self.x + self.width);
        let (top, bottom) = ordered(self.y, self.y + self.height);
        x >= left && x <= right && y >= top && y <= bottom
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Per-pass inputs of the node-data build that are not bins or converters.
#[derive(Clone, Copy)]
pub struct NodeDataParams<'a> {
    pub area_plot: bool,
    pub has_value_key: bool,
    pub style: &'a HistogramStyle,
    pub label: &'a HistogramLabelConfig,
    pub label_formatter: Option<&'a LabelFormatterFn>,
}

/// Projects bins into bar geometry and optional labels.
///
/// Bar edges come from the bin domain; height is
/// `|y(plotted) - y(0)|` where the plotted value is the density in area mode,
/// the aggregate with a value key, else the frequency. Bars plotting `0` get
/// no label. Label text always shows the aggregate, also in area mode.
pub fn build_node_data<T, X, Y>(
    bins: &[HistogramBin<T>],
    x_scale: &X,
    y_scale: &Y,
    params: NodeDataParams<'_>,
) -> Vec<HistogramNodeDatum>
where
    X: ValueToPixel + ?Sized,
    Y: ValueToPixel + ?Sized,
{
    let y_zero_px = y_scale.convert(0.0);
    let label_config = params.label;

    let nodes: Vec<HistogramNodeDatum> = bins
        .iter()
        .enumerate()
        .map(|(bin_index, bin)| {
            let domain = bin.domain();
            let x_min_px = x_scale.convert(domain.min);
            let x_max_px = x_scale.convert(domain.max);
            let plotted = bin.plotted_value(params.area_plot, params.has_value_key);
            let y_max_px = y_scale.convert(plotted);
            let width = x_max_px - x_min_px;
            let height = (y_max_px - y_zero_px).abs();

            let label = (plotted != 0.0).then(|| HistogramLabelDatum {
                text: format_with(params.label_formatter, bin.aggregated_value()),
                x: x_min_px + width / 2.0,
                y: y_max_px + height / 2.0,
                font_style: label_config.font_style,
                font_weight: label_config.font_weight,
                font_size: label_config.font_size,
                font_family: label_config.font_family.clone(),
                fill: label_config.color,
            });

            HistogramNodeDatum {
                bin_index,
                domain,
                x: x_min_px,
                y: y_max_px,
                width,
                height,
                fill: params.style.fill,
                stroke: params.style.stroke,
                stroke_width: params.style.stroke_width,
                label,
            }
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        labelled = nodes.iter().filter(|node| node.label.is_some()).count(),
        "built histogram node data"
    );
    nodes
}

//! Histogram series facade: configuration, node data, selections and the
//! host-facing tooltip/legend/event surface.

mod events;
mod invalidation;
mod label_format;
mod legend;
mod node_data;
mod series;
mod series_config;
mod series_interaction;
mod series_nodes;
mod series_render;
mod tooltip;

pub use events::{SeriesEvent, SeriesListener};
pub use invalidation::{InvalidationTopic, SeriesInvalidation};
pub use label_format::{DatumFormatterFn, LabelFormatterFn, format_number};
pub use legend::{LegendItem, LegendMarker};
pub use node_data::{
    HistogramLabelDatum, HistogramNodeDatum, NodeDataParams, build_node_data,
};
pub use series::{AccessorBinderFn, HistogramSeries};
pub use series_config::{
    HighlightStyle, HistogramLabelConfig, HistogramSeriesConfig, HistogramStyle, JoinMode,
};
pub use series_nodes::{HIGHLIGHTED_Z_INDEX, SelectionUpdate};
pub use tooltip::{HistogramTooltipParams, TooltipContent, TooltipOverride, TooltipRendererFn};

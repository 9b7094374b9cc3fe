use tracing::warn;

use crate::core::BinRecord;
use crate::error::{HistogramError, HistogramResult};
use crate::render::Color;

use super::legend::{LegendItem, LegendMarker};
use super::node_data::HistogramNodeDatum;
use super::tooltip::{HistogramTooltipParams, TooltipContent, TooltipFormatters, tooltip_content};
use super::{HistogramSeries, InvalidationTopic, SeriesEvent};

impl<T: BinRecord + 'static> HistogramSeries<T> {
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlights the bar at `node_index`, or clears the highlight.
    ///
    /// Takes effect on the next `update_selection`.
    pub fn set_highlighted(&mut self, node_index: Option<usize>) -> HistogramResult<()> {
        if let Some(index) = node_index {
            if index >= self.node_data.len() {
                return Err(HistogramError::InvalidData(format!(
                    "highlight index {index} out of range for {} nodes",
                    self.node_data.len()
                )));
            }
        }
        if self.highlighted == node_index {
            return Ok(());
        }

        self.highlighted = node_index;
        self.invalidation = self.invalidation.with_topic(InvalidationTopic::Style);
        self.emit(&SeriesEvent::HighlightChanged { node_index });
        Ok(())
    }

    /// Topmost visible bar containing the pixel point.
    #[must_use]
    pub fn node_at(&self, x: f64, y: f64) -> Option<&HistogramNodeDatum> {
        self.node_data
            .iter()
            .rev()
            .filter(|datum| datum.height > 0.0)
            .find(|datum| datum.contains_point(x, y))
    }

    /// Dispatches a click on the bar at `node_index` to listeners.
    ///
    /// Returns `false` when there is no such bar or no x key to report.
    pub fn node_click(&mut self, node_index: usize) -> bool {
        let Some(datum) = self.node_data.get(node_index) else {
            return false;
        };
        if self.config.x_key.is_empty() {
            warn!(series = %self.id, node_index, "node click ignored: no x key");
            return false;
        }

        let event = SeriesEvent::NodeClick {
            bin_index: datum.bin_index,
            domain: datum.domain,
            x_key: self.config.x_key.clone(),
        };
        self.emit(&event);
        true
    }

    /// Hit tests the pixel point and clicks the bar under it, if any.
    pub fn pointer_click(&mut self, x: f64, y: f64) -> bool {
        match self.node_at(x, y).map(|datum| datum.bin_index) {
            Some(index) => self.node_click(index),
            None => false,
        }
    }

    /// Tooltip for the bar at `node_index`; `None` without an x key or node.
    #[must_use]
    pub fn tooltip(&self, node_index: usize) -> Option<TooltipContent> {
        let x_key = self.x_accessor.as_ref()?.key();
        let datum = self.node_data.get(node_index)?;
        let bin = self.data.bin(datum.bin_index)?;

        let params = HistogramTooltipParams {
            bin,
            x_key,
            x_value: bin.domain(),
            x_name: &self.config.x_name,
            y_key: self.y_accessor.as_ref().map_or("", |y| y.key()),
            y_value: bin.aggregated_value(),
            y_name: &self.config.y_name,
            aggregation: self.config.aggregation.resolve(self.data.has_value_key()),
            color: datum.fill,
        };
        let formatters = TooltipFormatters {
            x_formatter: self.x_formatter.as_ref(),
            y_formatter: self.y_formatter.as_ref(),
            renderer: self.tooltip_renderer.as_ref(),
        };
        Some(tooltip_content(&params, &formatters))
    }

    /// Legend entry, only once the series has records.
    #[must_use]
    pub fn legend_item(&self) -> Option<LegendItem> {
        if self.records.is_empty() {
            return None;
        }

        let config = &self.config;
        let label = [&config.y_name, &config.y_key]
            .into_iter()
            .find(|text| !text.is_empty())
            .cloned()
            .unwrap_or_else(|| "Frequency".to_owned());
        let item_id = if config.y_key.is_empty() {
            config.x_key.clone()
        } else {
            config.y_key.clone()
        };

        Some(LegendItem {
            series_id: self.id.clone(),
            item_id,
            enabled: config.visible,
            label,
            marker: LegendMarker {
                fill: config.style.fill.unwrap_or(Color::TRANSPARENT),
                stroke: config.style.stroke.unwrap_or(Color::TRANSPARENT),
                fill_opacity: config.style.fill_opacity,
                stroke_opacity: config.style.stroke_opacity,
            },
        })
    }
}

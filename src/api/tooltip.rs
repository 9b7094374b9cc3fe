use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Aggregation, BinDomain, HistogramBin};
use crate::render::Color;

use super::label_format::{DatumFormatterFn, format_with};

/// Tooltip text for one bar. Plain text; markup and sanitizing belong to the
/// tooltip renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: Option<String>,
    pub content: String,
    pub color: Option<Color>,
}

/// Fields a custom tooltip renderer may replace; `None` keeps the default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipOverride {
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<Color>,
}

impl TooltipOverride {
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    fn merge_over(self, defaults: TooltipContent) -> TooltipContent {
        TooltipContent {
            title: self.title.or(defaults.title),
            content: self.content.unwrap_or(defaults.content),
            color: self.color.or(defaults.color),
        }
    }
}

/// Everything a custom tooltip renderer gets to see for one bar.
#[derive(Debug)]
pub struct HistogramTooltipParams<'a, T> {
    pub bin: &'a HistogramBin<T>,
    pub x_key: &'a str,
    pub x_value: BinDomain,
    pub x_name: &'a str,
    pub y_key: &'a str,
    pub y_value: f64,
    pub y_name: &'a str,
    pub aggregation: Aggregation,
    pub color: Option<Color>,
}

pub type TooltipRendererFn<T> =
    Arc<dyn Fn(&HistogramTooltipParams<'_, T>) -> TooltipOverride + Send + Sync + 'static>;

pub(crate) struct TooltipFormatters<'a, T> {
    pub x_formatter: Option<&'a DatumFormatterFn>,
    pub y_formatter: Option<&'a DatumFormatterFn>,
    pub renderer: Option<&'a TooltipRendererFn<T>>,
}

/// Title shows the bin range; content shows the aggregate (only with a value
/// key) and the frequency, one per line.
pub(crate) fn tooltip_content<T>(
    params: &HistogramTooltipParams<'_, T>,
    formatters: &TooltipFormatters<'_, T>,
) -> TooltipContent {
    let x_label = if params.x_name.is_empty() {
        params.x_key
    } else {
        params.x_name
    };
    let title = format!(
        "{x_label}: {} - {}",
        format_with(formatters.x_formatter, params.x_value.min),
        format_with(formatters.x_formatter, params.x_value.max),
    );

    let mut content = String::new();
    if !params.y_key.is_empty() {
        let y_label = if params.y_name.is_empty() {
            params.y_key
        } else {
            params.y_name
        };
        content.push_str(&format!(
            "{y_label} ({}): {}\n",
            params.aggregation,
            format_with(formatters.y_formatter, params.y_value)
        ));
    }
    content.push_str(&format!("Frequency: {}", params.bin.frequency()));

    let defaults = TooltipContent {
        title: Some(title),
        content,
        color: params.color,
    };
    match formatters.renderer {
        Some(renderer) => renderer(params).merge_over(defaults),
        None => defaults,
    }
}

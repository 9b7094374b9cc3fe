use serde::{Deserialize, Serialize};

use crate::core::{Aggregation, BinDomain, BinningOptions, BinningStrategy};
use crate::error::{HistogramError, HistogramResult};
use crate::render::Color;
use crate::scene::{DropShadow, FontStyle, FontWeight, LineDash, solid_line_dash};

/// How bar and label nodes are matched to the previous pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Datum `i` reuses the node previously at index `i`.
    #[default]
    Positional,
    /// Datums reuse the node whose bin had the same `[min, max]` domain.
    /// Keeps nodes stable when the bin count or bin order changes.
    ByBinDomain,
}

/// Fill/stroke styling of histogram bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramStyle {
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default = "default_opacity")]
    pub fill_opacity: f64,
    #[serde(default = "default_opacity")]
    pub stroke_opacity: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "solid_line_dash")]
    pub line_dash: LineDash,
    #[serde(default)]
    pub line_dash_offset: f64,
    #[serde(default)]
    pub shadow: Option<DropShadow>,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            fill_opacity: default_opacity(),
            stroke_opacity: default_opacity(),
            stroke_width: default_stroke_width(),
            line_dash: solid_line_dash(),
            line_dash_offset: 0.0,
            shadow: None,
        }
    }
}

/// Overrides applied to the highlighted bar. `None` keeps the bar's own value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(default = "default_highlight_fill")]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill: default_highlight_fill(),
            stroke: None,
            stroke_width: None,
        }
    }
}

/// Bar label styling. Labels are disabled unless turned on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramLabelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    #[serde(default)]
    pub font_weight: Option<FontWeight>,
    #[serde(default = "default_label_font_size")]
    pub font_size: f64,
    #[serde(default = "default_label_font_family")]
    pub font_family: String,
    #[serde(default = "default_label_color")]
    pub color: Color,
}

impl Default for HistogramLabelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            font_style: None,
            font_weight: None,
            font_size: default_label_font_size(),
            font_family: default_label_font_family(),
            color: default_label_color(),
        }
    }
}

/// Serializable histogram series configuration.
///
/// Hosts can persist/load it as JSON; hooks that cannot be serialized (label
/// formatter, tooltip renderer, axis formatters) are set on the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeriesConfig {
    #[serde(default)]
    pub x_key: String,
    #[serde(default)]
    pub y_key: String,
    #[serde(default)]
    pub x_name: String,
    #[serde(default)]
    pub y_name: String,
    #[serde(default)]
    pub bin_count: Option<usize>,
    #[serde(default)]
    pub bins: Option<Vec<BinDomain>>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub area_plot: bool,
    #[serde(default)]
    pub join_mode: JoinMode,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub style: HistogramStyle,
    #[serde(default)]
    pub highlight_style: HighlightStyle,
    #[serde(default)]
    pub label: HistogramLabelConfig,
}

impl Default for HistogramSeriesConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl HistogramSeriesConfig {
    /// Creates a frequency histogram over `x_key` with default styling.
    #[must_use]
    pub fn new(x_key: impl Into<String>) -> Self {
        Self {
            x_key: x_key.into(),
            y_key: String::new(),
            x_name: String::new(),
            y_name: String::new(),
            bin_count: None,
            bins: None,
            aggregation: Aggregation::default(),
            area_plot: false,
            join_mode: JoinMode::default(),
            visible: default_visible(),
            style: HistogramStyle::default(),
            highlight_style: HighlightStyle::default(),
            label: HistogramLabelConfig::default(),
        }
    }

    /// Sets the value key aggregated per bin.
    #[must_use]
    pub fn with_y_key(mut self, y_key: impl Into<String>) -> Self {
        self.y_key = y_key.into();
        self
    }

    /// Sets display names used by tooltips and the legend.
    #[must_use]
    pub fn with_names(mut self, x_name: impl Into<String>, y_name: impl Into<String>) -> Self {
        self.x_name = x_name.into();
        self.y_name = y_name.into();
        self
    }

    /// Sets the target bin count for derived boundaries.
    #[must_use]
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = Some(bin_count);
        self
    }

    /// Sets explicit bin boundaries; these take precedence over the bin count.
    #[must_use]
    pub fn with_bins<I, B>(mut self, bins: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<BinDomain>,
    {
        self.bins = Some(bins.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Enables density (area) mode: bar height is aggregate / bin width.
    #[must_use]
    pub fn with_area_plot(mut self, area_plot: bool) -> Self {
        self.area_plot = area_plot;
        self
    }

    #[must_use]
    pub fn with_join_mode(mut self, join_mode: JoinMode) -> Self {
        self.join_mode = join_mode;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.style.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.style.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: HistogramStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_highlight_style(mut self, highlight_style: HighlightStyle) -> Self {
        self.highlight_style = highlight_style;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: HistogramLabelConfig) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_labels_enabled(mut self, enabled: bool) -> Self {
        self.label.enabled = enabled;
        self
    }

    #[must_use]
    pub fn binning_strategy(&self) -> BinningStrategy {
        BinningStrategy::resolve(self.bins.as_deref(), self.bin_count)
    }

    #[must_use]
    pub fn binning_options(&self) -> BinningOptions {
        BinningOptions {
            strategy: self.binning_strategy(),
            aggregation: self.aggregation,
            area_plot: self.area_plot,
        }
    }

    /// Validates styling and bin count. Explicit bins are not checked for
    /// contiguity; keeping them ordered is the caller's responsibility.
    pub fn validate(&self) -> HistogramResult<()> {
        if self.bin_count == Some(0) {
            return Err(HistogramError::InvalidConfig(
                "bin count must be >= 1".to_owned(),
            ));
        }

        let style = &self.style;
        for (value, name) in [
            (style.fill_opacity, "fill_opacity"),
            (style.stroke_opacity, "stroke_opacity"),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(HistogramError::InvalidConfig(format!(
                    "style `{name}` must be finite and in [0, 1]"
                )));
            }
        }
        validate_width(style.stroke_width, "stroke_width")?;
        validate_width(style.line_dash_offset.abs(), "line_dash_offset")?;
        for segment in &style.line_dash {
            validate_width(*segment, "line_dash")?;
        }
        if let Some(width) = self.highlight_style.stroke_width {
            validate_width(width, "highlight stroke_width")?;
        }
        if !self.label.font_size.is_finite() || self.label.font_size <= 0.0 {
            return Err(HistogramError::InvalidConfig(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn validate_width(value: f64, name: &str) -> HistogramResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(HistogramError::InvalidConfig(format!(
            "style `{name}` must be finite and >= 0"
        )));
    }
    Ok(())
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_highlight_fill() -> Option<Color> {
    Some(Color::rgb(1.0, 1.0, 0.0))
}

fn default_label_font_size() -> f64 {
    12.0
}

fn default_label_font_family() -> String {
    "Verdana, sans-serif".to_owned()
}

fn default_label_color() -> Color {
    Color::rgb(70.0 / 255.0, 70.0 / 255.0, 70.0 / 255.0)
}

use serde::{Deserialize, Serialize};

use crate::error::{HistogramError, HistogramResult};
use crate::scene::{FontStyle, FontWeight, TextBaseline};

/// RGBA color with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Returns the color with its alpha multiplied by `opacity`.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            alpha: self.alpha * opacity,
            ..self
        }
    }

    pub fn validate(self) -> HistogramResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels
            .iter()
            .all(|channel| (0.0..=1.0).contains(channel))
        {
            Ok(())
        } else {
            Err(HistogramError::InvalidPrimitive(format!(
                "color {channels:?} has a channel outside [0, 1]"
            )))
        }
    }
}

fn check(condition: bool, message: &str) -> HistogramResult<()> {
    if condition {
        Ok(())
    } else {
        Err(HistogramError::InvalidPrimitive(message.to_owned()))
    }
}

/// One bar (or the highlight overlay) in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
}

impl RectPrimitive {
    /// Builds a rectangle from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
        }
    }

    pub fn validate(&self) -> HistogramResult<()> {
        check(
            [self.x, self.y, self.width, self.height]
                .iter()
                .all(|value| value.is_finite()),
            "bar geometry must be finite",
        )?;
        check(
            self.width >= 0.0 && self.height >= 0.0,
            "bar size must be >= 0",
        )?;
        check(
            self.stroke_width.is_finite() && self.stroke_width >= 0.0,
            "bar stroke width must be finite and >= 0",
        )?;
        check(
            self.line_dash
                .iter()
                .all(|segment| segment.is_finite() && *segment >= 0.0),
            "bar dash segments must be finite and >= 0",
        )?;
        self.fill.map_or(Ok(()), Color::validate)?;
        self.stroke.map_or(Ok(()), Color::validate)
    }
}

/// Horizontal anchor of a label relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// One bar label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
    pub fill: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextPrimitive {
    pub fn validate(&self) -> HistogramResult<()> {
        check(!self.text.is_empty(), "label text must not be empty")?;
        check(
            self.x.is_finite() && self.y.is_finite(),
            "label position must be finite",
        )?;
        check(
            self.font_size.is_finite() && self.font_size > 0.0,
            "label font size must be finite and > 0",
        )?;
        self.fill.validate()
    }
}

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::render::{Color, TextAlign};

/// Dash pattern in pixels; `[0]` draws a solid line.
pub type LineDash = SmallVec<[f64; 4]>;

#[must_use]
pub fn solid_line_dash() -> LineDash {
    smallvec![0.0]
}

/// Identifies what a scene node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    Bin,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvents {
    #[default]
    All,
    None,
}

/// Drop shadow painted under a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropShadow {
    #[serde(default = "default_shadow_enabled")]
    pub enabled: bool,
    #[serde(default = "default_shadow_color")]
    pub color: Color,
    #[serde(default)]
    pub x_offset: f64,
    #[serde(default)]
    pub y_offset: f64,
    #[serde(default = "default_shadow_blur")]
    pub blur: f64,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            enabled: default_shadow_enabled(),
            color: default_shadow_color(),
            x_offset: 0.0,
            y_offset: 0.0,
            blur: default_shadow_blur(),
        }
    }
}

fn default_shadow_enabled() -> bool {
    true
}

fn default_shadow_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.5)
}

fn default_shadow_blur() -> f64 {
    5.0
}

/// Mutable rectangle node owned by a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RectNode {
    pub tag: NodeTag,
    pub crisp: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub fill_opacity: f64,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    pub line_dash: LineDash,
    pub line_dash_offset: f64,
    pub fill_shadow: Option<DropShadow>,
    pub z_index: i64,
    pub visible: bool,
}

impl RectNode {
    #[must_use]
    pub fn new(tag: NodeTag) -> Self {
        Self {
            tag,
            crisp: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: None,
            stroke: None,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            stroke_width: 0.0,
            line_dash: solid_line_dash(),
            line_dash_offset: 0.0,
            fill_shadow: None,
            z_index: 0,
            visible: true,
        }
    }
}

/// Mutable text node owned by a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub tag: NodeTag,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
    pub font_size: f64,
    pub font_family: String,
    pub fill: Option<Color>,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub pointer_events: PointerEvents,
    pub visible: bool,
}

impl TextNode {
    #[must_use]
    pub fn new(tag: NodeTag) -> Self {
        Self {
            tag,
            text: String::new(),
            x: 0.0,
            y: 0.0,
            font_style: None,
            font_weight: None,
            font_size: 12.0,
            font_family: String::new(),
            fill: None,
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::default(),
            pointer_events: PointerEvents::default(),
            visible: true,
        }
    }
}

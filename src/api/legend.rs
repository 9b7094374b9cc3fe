use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Swatch drawn next to a legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendMarker {
    pub fill: Color,
    pub stroke: Color,
    pub fill_opacity: f64,
    pub stroke_opacity: f64,
}

/// Legend entry contributed by a histogram series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub series_id: String,
    pub item_id: String,
    pub enabled: bool,
    pub label: String,
    pub marker: LegendMarker,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Numeric slice of the x-axis covered by one bin.
///
/// Serialized as a `[min, max]` pair so explicit bin lists read naturally in
/// JSON configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct BinDomain {
    pub min: f64,
    pub max: f64,
}

impl BinDomain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max - self.min
    }

    /// Returns the pair in `(min, max)` order as stored.
    #[must_use]
    pub const fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl From<(f64, f64)> for BinDomain {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

impl From<BinDomain> for (f64, f64) {
    fn from(domain: BinDomain) -> Self {
        domain.as_tuple()
    }
}

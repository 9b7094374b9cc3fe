use crate::core::types::Viewport;
use crate::error::{HistogramError, HistogramResult};

/// `value -> pixel` conversion supplied by an axis collaborator.
pub trait ValueToPixel {
    fn convert(&self, value: f64) -> f64;
}

impl<F> ValueToPixel for F
where
    F: Fn(f64) -> f64,
{
    fn convert(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Linear mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> HistogramResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(HistogramError::InvalidScale(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(HistogramError::InvalidScale(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Horizontal scale spanning the viewport width left to right.
    pub fn horizontal(domain: (f64, f64), viewport: Viewport) -> HistogramResult<Self> {
        if !viewport.is_valid() {
            return Err(HistogramError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Self::new(domain, (0.0, f64::from(viewport.width)))
    }

    /// Vertical scale with the domain minimum at the bottom edge.
    pub fn vertical(domain: (f64, f64), viewport: Viewport) -> HistogramResult<Self> {
        if !viewport.is_valid() {
            return Err(HistogramError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Self::new(domain, (f64::from(viewport.height), 0.0))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn convert(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Pixel back to domain value. Returns `domain_start` for a zero-length range.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

impl ValueToPixel for LinearScale {
    fn convert(&self, value: f64) -> f64 {
        LinearScale::convert(*self, value)
    }
}

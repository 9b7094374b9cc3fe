/// Returns `(min, max)` over finite values, or `None` when none remain.
#[must_use]
pub fn continuous_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

/// Normalizes a possibly undefined or degenerate extent into a usable domain.
///
/// This is the contract an axis/scale collaborator provides; every published
/// domain goes through it.
pub trait ExtentFix {
    fn fix(&self, extent: Option<(f64, f64)>) -> (f64, f64);
}

impl<F> ExtentFix for F
where
    F: Fn(Option<(f64, f64)>) -> (f64, f64),
{
    fn fix(&self, extent: Option<(f64, f64)>) -> (f64, f64) {
        self(extent)
    }
}

/// Default extent fix: `[v, v]` widens symmetrically by `padding_ratio * |v|`
/// (by `1` when `v == 0`); undefined or non-finite extents become `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddedExtentFix {
    pub padding_ratio: f64,
}

impl Default for PaddedExtentFix {
    fn default() -> Self {
        Self {
            padding_ratio: 0.01,
        }
    }
}

impl ExtentFix for PaddedExtentFix {
    fn fix(&self, extent: Option<(f64, f64)>) -> (f64, f64) {
        let Some((min, max)) = extent else {
            return (0.0, 1.0);
        };
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if min != max {
            return (min, max);
        }

        let padding = (min * self.padding_ratio).abs();
        let padding = if padding > 0.0 && padding.is_finite() {
            padding
        } else {
            1.0
        };
        (min - padding, max + padding)
    }
}

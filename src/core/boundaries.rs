use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::extent::{ExtentFix, continuous_extent};
use crate::core::ticks::tick_ladder;
use crate::core::{BinDomain, FieldAccessor};

pub const DEFAULT_BIN_COUNT: usize = 10;

/// How bin edges are obtained for a processing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinningStrategy {
    /// Caller-supplied edges, used verbatim.
    Explicit(Vec<BinDomain>),
    /// Nice edges derived from the data extent for roughly this many bins.
    TargetCount(usize),
}

impl Default for BinningStrategy {
    fn default() -> Self {
        Self::TargetCount(DEFAULT_BIN_COUNT)
    }
}

impl BinningStrategy {
    /// Explicit bins win over a bin count; neither means the default count.
    #[must_use]
    pub fn resolve(bins: Option<&[BinDomain]>, bin_count: Option<usize>) -> Self {
        match (bins, bin_count) {
            (Some(bins), _) => Self::Explicit(bins.to_vec()),
            (None, Some(count)) => Self::TargetCount(count),
            (None, None) => Self::default(),
        }
    }
}

/// Produces the boundary list covering every finite x value of `records`.
///
/// Returns an empty list when the strategy derives edges and no record has a
/// continuous x value.
pub fn derive_boundaries<T>(
    records: &[T],
    x: &FieldAccessor<T>,
    strategy: &BinningStrategy,
    extent_fix: &dyn ExtentFix,
) -> Vec<BinDomain> {
    match strategy {
        BinningStrategy::Explicit(bins) => bins.clone(),
        BinningStrategy::TargetCount(count) => {
            let Some(extent) = continuous_extent(records.iter().filter_map(|r| x.read(r))) else {
                debug!(
                    records = records.len(),
                    x_key = x.key(),
                    "no continuous x values; bin set is empty"
                );
                return Vec::new();
            };
            nice_boundaries(extent_fix.fix(Some(extent)), *count)
        }
    }
}

/// Contiguous nice-step boundaries over `domain`.
///
/// One bin starts at every tick inside the domain and one extra bin is
/// prepended ending at the first tick, since that tick may lie above the
/// domain minimum.
#[must_use]
pub fn nice_boundaries(domain: (f64, f64), target_count: usize) -> Vec<BinDomain> {
    let Some(ladder) = tick_ladder(domain.0, domain.1, target_count) else {
        return Vec::new();
    };

    // Edges come from the same integer ladder, so neighbours share exact values.
    (ladder.first - 1..=ladder.last)
        .map(|index| BinDomain::new(ladder.value_at(index), ladder.value_at(index + 1)))
        .collect()
}

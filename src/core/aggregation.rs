use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{FieldAccessor, HistogramBin};

/// Summary statistic computed per bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Count,
    Sum,
    Mean,
}

impl Aggregation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Mean => "mean",
        }
    }

    /// Without a value key only frequency histograms are possible.
    #[must_use]
    pub const fn resolve(self, has_value_key: bool) -> Self {
        if has_value_key { self } else { Self::Count }
    }

    /// Evaluates the statistic over `members`.
    ///
    /// Members without a continuous value add nothing to the sum. `Mean` over
    /// an empty bin is `NaN`.
    #[must_use]
    pub fn evaluate<T>(self, members: &[T], value: Option<&FieldAccessor<T>>) -> f64 {
        let count = members.len() as f64;
        let Some(value) = value else {
            return count;
        };
        let sum = || {
            members
                .iter()
                .filter_map(|member| value.read(member))
                .sum::<f64>()
        };

        match self {
            Self::Count => count,
            Self::Sum => sum(),
            Self::Mean => sum() / count,
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sets `aggregated_value` on every bin. Runs after binning has completed.
pub fn aggregate_bins<T>(
    bins: &mut [HistogramBin<T>],
    aggregation: Aggregation,
    value: Option<&FieldAccessor<T>>,
) {
    let aggregation = aggregation.resolve(value.is_some());
    for bin in bins.iter_mut() {
        let aggregated = aggregation.evaluate(bin.members(), value);
        bin.set_aggregated_value(aggregated);
    }
}

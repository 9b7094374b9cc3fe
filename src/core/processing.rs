use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::aggregation::{Aggregation, aggregate_bins};
use crate::core::binner::{BinRecord, place_in_bins};
use crate::core::boundaries::{BinningStrategy, derive_boundaries};
use crate::core::extent::{ExtentFix, continuous_extent};
use crate::core::{FieldAccessor, HistogramBin};

/// Inputs of the processing pass that come from series configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinningOptions {
    pub strategy: BinningStrategy,
    pub aggregation: Aggregation,
    pub area_plot: bool,
}

/// Output of one processing pass: the bins plus the domains they span.
///
/// Both domains are `None` exactly when there are no bins.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData<T> {
    bins: Vec<HistogramBin<T>>,
    x_domain: Option<(f64, f64)>,
    y_domain: Option<(f64, f64)>,
    area_plot: bool,
    has_value_key: bool,
}

impl<T> Default for HistogramData<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> HistogramData<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bins: Vec::new(),
            x_domain: None,
            y_domain: None,
            area_plot: false,
            has_value_key: false,
        }
    }

    #[must_use]
    pub fn bins(&self) -> &[HistogramBin<T>] {
        &self.bins
    }

    #[must_use]
    pub fn bin(&self, index: usize) -> Option<&HistogramBin<T>> {
        self.bins.get(index)
    }

    #[must_use]
    pub fn into_bins(self) -> Vec<HistogramBin<T>> {
        self.bins
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[must_use]
    pub fn x_domain(&self) -> Option<(f64, f64)> {
        self.x_domain
    }

    #[must_use]
    pub fn y_domain(&self) -> Option<(f64, f64)> {
        self.y_domain
    }

    #[must_use]
    pub fn area_plot(&self) -> bool {
        self.area_plot
    }

    #[must_use]
    pub fn has_value_key(&self) -> bool {
        self.has_value_key
    }

    /// Per-bin y values in bin order, matching what node data will plot.
    pub fn plotted_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins
            .iter()
            .map(|bin| bin.plotted_value(self.area_plot, self.has_value_key))
    }

    /// Sum of all bin frequencies.
    #[must_use]
    pub fn total_frequency(&self) -> usize {
        self.bins.iter().map(HistogramBin::frequency).sum()
    }
}

/// Runs boundary derivation, binning and aggregation, then publishes domains.
///
/// Never fails: empty records or a missing x accessor give empty data.
pub fn process_histogram<T: BinRecord>(
    records: &[T],
    x: Option<&FieldAccessor<T>>,
    y: Option<&FieldAccessor<T>>,
    options: &BinningOptions,
    extent_fix: &dyn ExtentFix,
) -> HistogramData<T> {
    let Some(x) = x else {
        debug!(records = records.len(), "no x key configured; nothing to bin");
        return HistogramData::empty();
    };
    if records.is_empty() {
        return HistogramData::empty();
    }

    let boundaries = derive_boundaries(records, x, &options.strategy, extent_fix);
    if boundaries.is_empty() {
        return HistogramData::empty();
    }

    let mut bins = place_in_bins(records, x, &boundaries);
    aggregate_bins(&mut bins, options.aggregation, y);

    let mut data = HistogramData {
        bins,
        x_domain: None,
        y_domain: None,
        area_plot: options.area_plot,
        has_value_key: y.is_some(),
    };

    let y_max = continuous_extent(data.plotted_values()).map_or(1.0, |(_, max)| max);
    data.y_domain = Some(extent_fix.fix(Some((0.0, y_max))));
    // The x domain stays on the bin edges; only the y domain is fixed.
    if let (Some(first), Some(last)) = (data.bins.first(), data.bins.last()) {
        data.x_domain = Some((first.domain().min, last.domain().max));
    }

    debug!(
        records = records.len(),
        bins = data.bins.len(),
        binned = data.total_frequency(),
        aggregation = %options.aggregation.resolve(data.has_value_key),
        area_plot = options.area_plot,
        "processed histogram data"
    );
    data
}

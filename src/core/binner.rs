use tracing::{debug, trace};

use crate::core::{BinDomain, FieldAccessor, HistogramBin};

/// Bound on record types that can be binned.
///
/// With `parallel-binning` the sort runs on rayon and records must be `Sync`.
#[cfg(not(feature = "parallel-binning"))]
pub trait BinRecord: Clone {}
#[cfg(not(feature = "parallel-binning"))]
impl<T: Clone> BinRecord for T {}

#[cfg(feature = "parallel-binning")]
pub trait BinRecord: Clone + Sync {}
#[cfg(feature = "parallel-binning")]
impl<T: Clone + Sync> BinRecord for T {}

/// Places records into one bin per boundary.
///
/// Records are sorted by x once, then bins and records are walked together
/// with two forward-only cursors, so the pass is `O(n log n + n + b)`.
/// Bins are closed at the upper edge: a value equal to `max` stays in that
/// bin. Values below the first lower edge land in the first bin. Values
/// above the last upper edge are dropped, as are records without a
/// continuous x value.
pub fn place_in_bins<T: BinRecord>(
    records: &[T],
    x: &FieldAccessor<T>,
    boundaries: &[BinDomain],
) -> Vec<HistogramBin<T>> {
    let mut bins: Vec<HistogramBin<T>> = boundaries
        .iter()
        .copied()
        .map(HistogramBin::new)
        .collect();
    if bins.is_empty() {
        return bins;
    }

    let mut keyed: Vec<(f64, &T)> = records
        .iter()
        .filter_map(|record| x.read(record).map(|value| (value, record)))
        .collect();
    let skipped = records.len() - keyed.len();
    sort_by_value(&mut keyed);

    let last_bin = bins.len() - 1;
    let mut current = 0;
    let mut dropped = 0;
    for (position, (value, record)) in keyed.iter().enumerate() {
        while *value > boundaries[current].max && current < last_bin {
            current += 1;
        }
        if *value > boundaries[current].max {
            // Sorted input: every remaining value is beyond the last bin too.
            dropped += keyed.len() - position;
            break;
        }
        bins[current].push((*record).clone());
    }

    if skipped > 0 || dropped > 0 {
        debug!(
            skipped_non_continuous = skipped,
            dropped_out_of_range = dropped,
            x_key = x.key(),
            "records excluded from bins"
        );
    }
    trace!(
        bins = bins.len(),
        placed = keyed.len() - dropped,
        "binned records"
    );
    bins
}

#[cfg(not(feature = "parallel-binning"))]
fn sort_by_value<T: BinRecord>(keyed: &mut [(f64, &T)]) {
    keyed.sort_by(|left, right| left.0.total_cmp(&right.0));
}

#[cfg(feature = "parallel-binning")]
fn sort_by_value<T: BinRecord>(keyed: &mut [(f64, &T)]) {
    use rayon::slice::ParallelSliceMut;

    keyed.par_sort_by(|left, right| left.0.total_cmp(&right.0));
}

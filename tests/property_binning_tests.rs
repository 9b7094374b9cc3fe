use chart_histogram::core::{
    Aggregation, BinningOptions, BinningStrategy, FieldAccessor, PaddedExtentFix, Record,
    nice_boundaries, process_histogram,
};
use chart_histogram::scene::{Selection, positional_key};
use proptest::prelude::*;

fn records(values: &[(f64, f64)]) -> Vec<Record> {
    values
        .iter()
        .map(|(x, v)| Record::new().with("x", *x).with("v", *v))
        .collect()
}

fn options(count: usize, aggregation: Aggregation) -> BinningOptions {
    BinningOptions {
        strategy: BinningStrategy::TargetCount(count),
        aggregation,
        area_plot: false,
    }
}

proptest! {
    #[test]
    fn derived_boundaries_are_contiguous_and_cover_extent(
        start in -10_000.0f64..10_000.0,
        span in 0.001f64..5_000.0,
        count in 1usize..40
    ) {
        let stop = start + span;
        let bins = nice_boundaries((start, stop), count);

        prop_assert!(!bins.is_empty());
        for bin in &bins {
            prop_assert!(bin.min < bin.max);
        }
        for pair in bins.windows(2) {
            prop_assert_eq!(pair[0].max, pair[1].min);
        }
        prop_assert!(bins[0].min <= start);
        prop_assert!(bins[bins.len() - 1].max >= stop);
    }

    #[test]
    fn frequencies_sum_to_the_number_of_finite_values(
        values in prop::collection::vec((-1_000i32..1_000, -100.0f64..100.0), 1..200),
        count in 1usize..30
    ) {
        // Quarter steps keep every value exactly representable.
        let values: Vec<(f64, f64)> = values
            .into_iter()
            .map(|(x, v)| (f64::from(x) / 4.0, v))
            .collect();
        let data = records(&values);
        let x = FieldAccessor::bind("x");

        let result = process_histogram(
            &data,
            x.as_ref(),
            None,
            &options(count, Aggregation::Count),
            &PaddedExtentFix::default(),
        );

        prop_assert_eq!(result.total_frequency(), values.len());
        for bin in result.bins() {
            prop_assert_eq!(bin.aggregated_value(), bin.frequency() as f64);
            for member in bin.members() {
                let x = member.get("x").and_then(|value| value.as_continuous()).unwrap_or(f64::NAN);
                prop_assert!(x >= bin.domain().min && x <= bin.domain().max);
            }
        }
    }

    #[test]
    fn mean_is_sum_over_frequency(
        values in prop::collection::vec((-500i32..500, -100.0f64..100.0), 1..120),
        count in 1usize..12
    ) {
        let values: Vec<(f64, f64)> = values
            .into_iter()
            .map(|(x, v)| (f64::from(x) / 2.0, v))
            .collect();
        let data = records(&values);
        let x = FieldAccessor::bind("x");
        let v = FieldAccessor::bind("v");

        let sums = process_histogram(
            &data,
            x.as_ref(),
            v.as_ref(),
            &options(count, Aggregation::Sum),
            &PaddedExtentFix::default(),
        );
        let means = process_histogram(
            &data,
            x.as_ref(),
            v.as_ref(),
            &options(count, Aggregation::Mean),
            &PaddedExtentFix::default(),
        );

        prop_assert_eq!(sums.bins().len(), means.bins().len());
        for (sum_bin, mean_bin) in sums.bins().iter().zip(means.bins()) {
            if mean_bin.frequency() == 0 {
                prop_assert!(mean_bin.aggregated_value().is_nan());
            } else {
                let expected = sum_bin.aggregated_value() / sum_bin.frequency() as f64;
                prop_assert!((mean_bin.aggregated_value() - expected).abs() <= 1e-9);
            }
        }
    }

    #[test]
    fn repeated_join_is_idempotent(
        first_len in 0usize..50,
        second_len in 0usize..50
    ) {
        let first: Vec<usize> = (0..first_len).collect();
        let second: Vec<usize> = (0..second_len).collect();
        let mut selection: Selection<usize> = Selection::new();
        selection.join(&first, positional_key, |d, _| *d, drop).expect("first join");

        let summary = selection.join(&second, positional_key, |d, _| *d, drop).expect("second join");
        prop_assert_eq!(summary.entered, second_len.saturating_sub(first_len));
        prop_assert_eq!(summary.exited, first_len.saturating_sub(second_len));
        prop_assert_eq!(summary.updated, first_len.min(second_len));

        let again = selection.join(&second, positional_key, |d, _| *d, drop).expect("third join");
        prop_assert!(again.is_pure_update());
        prop_assert_eq!(selection.len(), second_len);
    }
}

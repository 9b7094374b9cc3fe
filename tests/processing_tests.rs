use approx::assert_relative_eq;
use chart_histogram::core::{
    Aggregation, BinDomain, BinningOptions, BinningStrategy, FieldAccessor, PaddedExtentFix,
    Record, process_histogram,
};

fn records(xs: &[f64]) -> Vec<Record> {
    xs.iter().map(|x| Record::new().with("x", *x)).collect()
}

fn options(strategy: BinningStrategy) -> BinningOptions {
    BinningOptions {
        strategy,
        ..BinningOptions::default()
    }
}

#[test]
fn frequency_histogram_publishes_domains() {
    let data = records(&[1.0, 2.0, 9.0]);
    let x = FieldAccessor::bind("x");

    let result = process_histogram(
        &data,
        x.as_ref(),
        None,
        &options(BinningStrategy::TargetCount(2)),
        &PaddedExtentFix::default(),
    );

    assert_eq!(result.bins().len(), 2);
    assert_eq!(result.total_frequency(), 3);
    assert_eq!(result.x_domain(), Some((0.0, 10.0)));
    assert_eq!(result.y_domain(), Some((0.0, 2.0)));
    assert!(!result.has_value_key());
}

#[test]
fn empty_records_produce_no_bins_and_no_domains() {
    let x = FieldAccessor::<Record>::bind("x");
    let result = process_histogram(
        &[],
        x.as_ref(),
        None,
        &options(BinningStrategy::Explicit(vec![BinDomain::new(0.0, 1.0)])),
        &PaddedExtentFix::default(),
    );

    assert!(result.is_empty());
    assert_eq!(result.x_domain(), None);
    assert_eq!(result.y_domain(), None);
}

#[test]
fn missing_x_key_produces_no_bins() {
    let data = records(&[1.0, 2.0]);
    let result = process_histogram(
        &data,
        None,
        None,
        &options(BinningStrategy::TargetCount(4)),
        &PaddedExtentFix::default(),
    );
    assert!(result.is_empty());
    assert_eq!(result.x_domain(), None);
}

#[test]
fn y_domain_falls_back_to_unit_when_everything_is_nan() {
    let data = vec![Record::new().with("x", 1.0).with("v", "n/a")];
    let x = FieldAccessor::bind("x");
    let v = FieldAccessor::bind("v");
    let mut opts = options(BinningStrategy::Explicit(vec![
        BinDomain::new(0.0, 2.0),
        BinDomain::new(2.0, 4.0),
    ]));
    opts.aggregation = Aggregation::Mean;

    let result = process_histogram(&data, x.as_ref(), v.as_ref(), &opts, &PaddedExtentFix::default());

    // bin 0 mean has no summable value: 0 / 1; bin 1 is empty: NaN
    assert_relative_eq!(result.bins()[0].aggregated_value(), 0.0);
    assert!(result.bins()[1].aggregated_value().is_nan());
    assert_eq!(result.y_domain(), Some((-1.0, 1.0)));
}

#[test]
fn area_plot_domain_uses_density() {
    let data = records(&[0.5, 1.0, 1.5, 3.0]);
    let x = FieldAccessor::bind("x");
    let mut opts = options(BinningStrategy::Explicit(vec![
        BinDomain::new(0.0, 2.0),
        BinDomain::new(2.0, 7.0),
    ]));
    opts.area_plot = true;

    let result = process_histogram(&data, x.as_ref(), None, &opts, &PaddedExtentFix::default());

    let plotted: Vec<f64> = result.plotted_values().collect();
    assert_relative_eq!(plotted[0], 1.5);
    assert_relative_eq!(plotted[1], 0.2);
    assert_eq!(result.y_domain(), Some((0.0, 1.5)));
    assert_eq!(result.x_domain(), Some((0.0, 7.0)));
}

#[test]
fn custom_extent_fix_shapes_only_the_y_domain() {
    let data = records(&[1.0, 2.0, 9.0]);
    let x = FieldAccessor::bind("x");
    let fix = |extent: Option<(f64, f64)>| {
        let (min, max) = extent.unwrap_or((0.0, 1.0));
        (min - 1.0, max + 1.0)
    };

    let result = process_histogram(
        &data,
        x.as_ref(),
        None,
        &options(BinningStrategy::Explicit(vec![
            BinDomain::new(0.0, 5.0),
            BinDomain::new(5.0, 10.0),
        ])),
        &fix,
    );

    assert_eq!(result.x_domain(), Some((0.0, 10.0)));
    assert_eq!(result.y_domain(), Some((-1.0, 3.0)));
}

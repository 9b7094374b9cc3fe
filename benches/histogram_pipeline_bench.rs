use chart_histogram::api::{HistogramSeries, HistogramSeriesConfig};
use chart_histogram::core::{
    BinningOptions, BinningStrategy, FieldAccessor, LinearScale, PaddedExtentFix, Record,
    Viewport, process_histogram,
};
use chart_histogram::scene::{Selection, positional_key};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_records(len: usize) -> Vec<Record> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            // Deterministic spread with a bump in the middle of the range.
            let x = (t * 7.31).sin() * 500.0 + (t * 0.013).cos() * 250.0;
            Record::new().with("x", x).with("v", t % 97.0)
        })
        .collect()
}

fn bench_process_histogram_100k(c: &mut Criterion) {
    let records = generated_records(100_000);
    let x = FieldAccessor::bind("x");
    let options = BinningOptions {
        strategy: BinningStrategy::TargetCount(40),
        ..BinningOptions::default()
    };

    c.bench_function("process_histogram_100k", |b| {
        b.iter(|| {
            let data = process_histogram(
                black_box(&records),
                x.as_ref(),
                None,
                &options,
                &PaddedExtentFix::default(),
            );
            black_box(data.total_frequency());
        })
    });
}

fn bench_positional_join_10k(c: &mut Criterion) {
    let data: Vec<usize> = (0..10_000).collect();
    let mut selection: Selection<usize> = Selection::new();
    selection
        .join(&data, positional_key, |d, _| *d, drop)
        .expect("initial join");

    c.bench_function("positional_join_10k_pure_update", |b| {
        b.iter(|| {
            let summary = selection
                .join(black_box(&data), positional_key, |d, _| *d, drop)
                .expect("join");
            black_box(summary);
        })
    });
}

fn bench_series_pass_20k(c: &mut Criterion) {
    let viewport = Viewport::new(1600, 900);
    let config = HistogramSeriesConfig::new("x")
        .with_y_key("v")
        .with_bin_count(60)
        .with_labels_enabled(true);
    let mut series = HistogramSeries::new("bench", config).expect("series init");
    let records = generated_records(20_000);

    c.bench_function("series_full_pass_20k", |b| {
        b.iter(|| {
            series.set_data(records.clone());
            let update = series
                .run_pass(|x, y| {
                    Ok((
                        LinearScale::horizontal(x, viewport)?,
                        LinearScale::vertical(y, viewport)?,
                    ))
                })
                .expect("pass");
            black_box(update);
            black_box(series.render_frame(viewport));
        })
    });
}

criterion_group!(
    benches,
    bench_process_histogram_100k,
    bench_positional_join_10k,
    bench_series_pass_20k
);
criterion_main!(benches);

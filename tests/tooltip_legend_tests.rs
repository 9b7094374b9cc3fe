use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chart_histogram::api::{
    DatumFormatterFn, HistogramSeries, HistogramSeriesConfig, HistogramTooltipParams,
    SeriesEvent, SeriesListener, TooltipOverride, TooltipRendererFn,
};
use chart_histogram::core::{Aggregation, BinDomain, LinearScale, Record, Viewport};
use chart_histogram::HistogramResult;
use chart_histogram::render::Color;

const VIEWPORT: Viewport = Viewport {
    width: 100,
    height: 200,
};

fn scales(x: (f64, f64), y: (f64, f64)) -> HistogramResult<(LinearScale, LinearScale)> {
    Ok((
        LinearScale::horizontal(x, VIEWPORT)?,
        LinearScale::vertical(y, VIEWPORT)?,
    ))
}

fn processed(config: HistogramSeriesConfig, records: Vec<Record>) -> HistogramSeries<Record> {
    let mut series = HistogramSeries::new("histogram", config).expect("series init");
    series.set_data(records);
    series.run_pass(scales).expect("pass");
    series
}

fn xv(x: f64, v: f64) -> Record {
    Record::new().with("x", x).with("v", v)
}

struct Recorder {
    id: String,
    events: Rc<RefCell<Vec<SeriesEvent>>>,
}

impl SeriesListener for Recorder {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &SeriesEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn recorder(id: &str) -> (Box<Recorder>, Rc<RefCell<Vec<SeriesEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let listener = Recorder {
        id: id.to_owned(),
        events: Rc::clone(&events),
    };
    (Box::new(listener), events)
}

fn count_content(params: &HistogramTooltipParams<'_, Record>) -> TooltipOverride {
    TooltipOverride::content(format!("{} records", params.bin.frequency()))
}

#[test]
fn frequency_tooltip_shows_range_and_count() {
    let series = processed(
        HistogramSeriesConfig::new("x").with_bins([(0.0, 5.0), (5.0, 10.0)]),
        vec![Record::new().with("x", 1.0), Record::new().with("x", 2.0)],
    );

    let tooltip = series.tooltip(0).expect("tooltip");

    assert_eq!(tooltip.title.as_deref(), Some("x: 0 - 5"));
    assert_eq!(tooltip.content, "Frequency: 2");
}

#[test]
fn value_tooltip_names_the_aggregation() {
    let config = HistogramSeriesConfig::new("x")
        .with_y_key("v")
        .with_names("Age", "Income")
        .with_aggregation(Aggregation::Mean)
        .with_bins([(0.0, 3.0)])
        .with_fill(Color::rgb(0.0, 0.5, 0.0));
    let series = processed(config, vec![xv(1.0, 10.0), xv(2.0, 20.0)]);

    let tooltip = series.tooltip(0).expect("tooltip");

    assert_eq!(tooltip.title.as_deref(), Some("Age: 0 - 3"));
    assert_eq!(tooltip.content, "Income (mean): 15\nFrequency: 2");
    assert_eq!(tooltip.color, Some(Color::rgb(0.0, 0.5, 0.0)));
}

#[test]
fn datum_formatters_and_renderer_override_defaults() {
    let mut series = processed(
        HistogramSeriesConfig::new("x").with_bins([(0.0, 2.5)]),
        vec![Record::new().with("x", 1.0)],
    );
    let x_formatter: DatumFormatterFn = Arc::new(|value: f64| format!("{value:.2}"));
    series.set_datum_formatters(Some(x_formatter), None);
    let renderer: TooltipRendererFn<Record> = Arc::new(count_content);
    series.set_tooltip_renderer(Some(renderer));

    let tooltip = series.tooltip(0).expect("tooltip");

    assert_eq!(tooltip.title.as_deref(), Some("x: 0.00 - 2.50"));
    assert_eq!(tooltip.content, "1 records");
}

#[test]
fn tooltip_is_empty_without_x_key_or_node() {
    let series = processed(
        HistogramSeriesConfig::new("x").with_bins([(0.0, 5.0)]),
        vec![Record::new().with("x", 1.0)],
    );
    assert!(series.tooltip(3).is_none());

    let series = processed(HistogramSeriesConfig::new(""), vec![Record::new().with("x", 1.0)]);
    assert!(series.tooltip(0).is_none());
}

#[test]
fn legend_item_requires_records_and_falls_back_to_frequency() {
    let series = processed(HistogramSeriesConfig::new("x").with_bin_count(2), Vec::new());
    assert!(series.legend_item().is_none());

    let series = processed(
        HistogramSeriesConfig::new("x").with_bin_count(2),
        vec![Record::new().with("x", 1.0)],
    );
    let item = series.legend_item().expect("legend item");
    assert_eq!(item.label, "Frequency");
    assert_eq!(item.series_id, "histogram");
    assert!(item.enabled);
    assert_eq!(item.marker.fill, Color::TRANSPARENT);
    assert_eq!(item.marker.stroke, Color::TRANSPARENT);

    let series = processed(
        HistogramSeriesConfig::new("x")
            .with_y_key("v")
            .with_stroke(Color::rgb(1.0, 0.0, 0.0)),
        vec![xv(1.0, 2.0)],
    );
    let item = series.legend_item().expect("legend item");
    assert_eq!(item.label, "v");
    assert_eq!(item.item_id, "v");
    assert_eq!(item.marker.stroke, Color::rgb(1.0, 0.0, 0.0));
}

#[test]
fn click_reaches_listeners_with_bin_domain() {
    let mut series = processed(
        HistogramSeriesConfig::new("x").with_bins([(0.0, 5.0), (5.0, 10.0)]),
        vec![Record::new().with("x", 1.0), Record::new().with("x", 6.0)],
    );
    let (listener, events) = recorder("clicks");
    series.add_listener(listener).expect("register");

    assert!(series.pointer_click(75.0, 150.0));
    assert!(!series.node_click(9));

    let events = events.borrow();
    assert_eq!(
        events.as_slice(),
        &[SeriesEvent::NodeClick {
            bin_index: 1,
            domain: BinDomain::new(5.0, 10.0),
            x_key: "x".to_owned(),
        }]
    );
}

#[test]
fn listeners_see_pipeline_events() {
    let mut series = HistogramSeries::new(
        "histogram",
        HistogramSeriesConfig::new("x").with_bin_count(2),
    )
    .expect("series init");
    let (listener, events) = recorder("pipeline");
    series.add_listener(listener).expect("register");
    series.set_data(vec![Record::new().with("x", 1.0), Record::new().with("x", 9.0)]);

    series.run_pass(scales).expect("pass");

    let events = events.borrow();
    assert!(matches!(
        events[0],
        SeriesEvent::DataProcessed {
            bins: 2,
            binned_records: 2
        }
    ));
    assert!(matches!(events[1], SeriesEvent::SelectionUpdated { .. }));
}

#[test]
fn listener_ids_must_be_unique_and_non_empty() {
    let mut series = HistogramSeries::<Record>::new("h", HistogramSeriesConfig::new("x"))
        .expect("series init");

    series.add_listener(recorder("a").0).expect("first");
    assert!(series.add_listener(recorder("a").0).is_err());
    assert!(series.add_listener(recorder("").0).is_err());
    assert_eq!(series.listener_count(), 1);

    assert!(series.remove_listener("a"));
    assert!(!series.remove_listener("a"));
    assert_eq!(series.listener_count(), 0);
}

#[test]
fn hit_test_ignores_points_outside_bars() {
    let series = processed(
        HistogramSeriesConfig::new("x").with_bins([(0.0, 5.0), (5.0, 10.0)]),
        vec![
            Record::new().with("x", 1.0),
            Record::new().with("x", 2.0),
            Record::new().with("x", 6.0),
        ],
    );

    let hit = series.node_at(25.0, 150.0).expect("bar under point");
    assert_eq!(hit.bin_index, 0);
    assert!(series.node_at(75.0, 50.0).is_none());
}

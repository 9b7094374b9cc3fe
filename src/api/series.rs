use std::sync::Arc;

use tracing::debug;

use crate::core::{
    BinRecord, ExtentFix, FieldAccessor, HistogramData, KeyedRecord, PaddedExtentFix,
    ValueToPixel, process_histogram,
};
use crate::error::{HistogramError, HistogramResult};
use crate::scene::{JoinKey, RectNode, Selection, TextNode};

use super::label_format::{DatumFormatterFn, LabelFormatterFn};
use super::node_data::{HistogramNodeDatum, NodeDataParams, build_node_data};
use super::tooltip::TooltipRendererFn;
use super::{
    HistogramSeriesConfig, InvalidationTopic, SelectionUpdate, SeriesEvent, SeriesInvalidation,
    SeriesListener,
};

/// Resolves a configured key into a field reader for `T`.
pub type AccessorBinderFn<T> = Arc<dyn Fn(&str) -> Option<FieldAccessor<T>> + Send + Sync>;

/// One histogram series: config, records and the retained scene it drives.
///
/// A draw pass is `process_data`, then `create_node_data` with the axis
/// converters, then `update_selection`. `run_pass` performs all three.
pub struct HistogramSeries<T: BinRecord + 'static> {
    pub(super) id: String,
    pub(super) config: HistogramSeriesConfig,
    binder: AccessorBinderFn<T>,
    pub(super) x_accessor: Option<FieldAccessor<T>>,
    pub(super) y_accessor: Option<FieldAccessor<T>>,
    pub(super) records: Vec<T>,
    extent_fix: Box<dyn ExtentFix>,
    pub(super) data: HistogramData<T>,
    pub(super) node_data: Vec<HistogramNodeDatum>,
    pub(super) bars: Selection<RectNode, JoinKey>,
    pub(super) labels: Selection<TextNode, JoinKey>,
    pub(super) highlight: Selection<RectNode, JoinKey>,
    pub(super) highlighted: Option<usize>,
    label_formatter: Option<LabelFormatterFn>,
    pub(super) x_formatter: Option<DatumFormatterFn>,
    pub(super) y_formatter: Option<DatumFormatterFn>,
    pub(super) tooltip_renderer: Option<TooltipRendererFn<T>>,
    listeners: Vec<Box<dyn SeriesListener>>,
    pub(super) invalidation: SeriesInvalidation,
}

impl<T: BinRecord + KeyedRecord + 'static> HistogramSeries<T> {
    /// Creates a series that reads fields by name through [`KeyedRecord`].
    pub fn new(id: impl Into<String>, config: HistogramSeriesConfig) -> HistogramResult<Self> {
        Self::with_binder(id, config, FieldAccessor::<T>::bind)
    }
}

impl<T: BinRecord + 'static> HistogramSeries<T> {
    /// Creates a series with a custom key-to-accessor binder, for record
    /// types that are not [`KeyedRecord`].
    pub fn with_binder(
        id: impl Into<String>,
        config: HistogramSeriesConfig,
        binder: impl Fn(&str) -> Option<FieldAccessor<T>> + Send + Sync + 'static,
    ) -> HistogramResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(HistogramError::InvalidConfig(
                "series id must not be empty".to_owned(),
            ));
        }
        config.validate()?;

        let binder: AccessorBinderFn<T> = Arc::new(binder);
        let x_accessor = binder(&config.x_key);
        let y_accessor = binder(&config.y_key);
        Ok(Self {
            id,
            config,
            binder,
            x_accessor,
            y_accessor,
            records: Vec::new(),
            extent_fix: Box::new(PaddedExtentFix::default()),
            data: HistogramData::empty(),
            node_data: Vec::new(),
            bars: Selection::new(),
            labels: Selection::new(),
            highlight: Selection::new(),
            highlighted: None,
            label_formatter: None,
            x_formatter: None,
            y_formatter: None,
            tooltip_renderer: None,
            listeners: Vec::new(),
            invalidation: SeriesInvalidation::all(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &HistogramSeriesConfig {
        &self.config
    }

    /// Replaces the configuration and rebinds the x/y accessors.
    ///
    /// The whole pipeline is invalidated; nothing is recomputed until the
    /// next pass.
    pub fn set_config(&mut self, config: HistogramSeriesConfig) -> HistogramResult<()> {
        config.validate()?;
        self.x_accessor = (self.binder)(&config.x_key);
        self.y_accessor = (self.binder)(&config.y_key);
        self.config = config;
        self.invalidation = SeriesInvalidation::all();
        Ok(())
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn set_data(&mut self, records: Vec<T>) {
        self.records = records;
        self.invalidation = self.invalidation.with_topic(InvalidationTopic::Data);
    }

    /// Replaces the extent fix applied to both published domains.
    pub fn set_extent_fix(&mut self, extent_fix: impl ExtentFix + 'static) {
        self.extent_fix = Box::new(extent_fix);
        self.invalidation = self.invalidation.with_topic(InvalidationTopic::Data);
    }

    pub fn set_label_formatter(&mut self, formatter: Option<LabelFormatterFn>) {
        self.label_formatter = formatter;
        self.invalidation = self.invalidation.with_topic(InvalidationTopic::Axis);
    }

    /// Sets the formatters tooltips use for the bin range and the aggregate.
    pub fn set_datum_formatters(
        &mut self,
        x_formatter: Option<DatumFormatterFn>,
        y_formatter: Option<DatumFormatterFn>,
    ) {
        self.x_formatter = x_formatter;
        self.y_formatter = y_formatter;
    }

    pub fn set_tooltip_renderer(&mut self, renderer: Option<TooltipRendererFn<T>>) {
        self.tooltip_renderer = renderer;
    }

    #[must_use]
    pub fn invalidation(&self) -> SeriesInvalidation {
        self.invalidation
    }

    /// Marks converters as changed so the next pass rebuilds node data.
    pub fn invalidate_axes(&mut self) {
        self.invalidation = self.invalidation.with_topic(InvalidationTopic::Axis);
    }

    /// Bins and aggregates the current records, then publishes domains.
    pub fn process_data(&mut self) -> &HistogramData<T> {
        let options = self.config.binning_options();
        self.data = process_histogram(
            &self.records,
            self.x_accessor.as_ref(),
            self.y_accessor.as_ref(),
            &options,
            self.extent_fix.as_ref(),
        );
        if self
            .highlighted
            .is_some_and(|index| index >= self.data.bins().len())
        {
            self.highlighted = None;
        }
        self.invalidation = self
            .invalidation
            .without_topic(InvalidationTopic::Data)
            .with_topic(InvalidationTopic::Axis);

        let event = SeriesEvent::DataProcessed {
            bins: self.data.bins().len(),
            binned_records: self.data.total_frequency(),
        };
        self.emit(&event);
        &self.data
    }

    #[must_use]
    pub fn data(&self) -> &HistogramData<T> {
        &self.data
    }

    /// Published x domain, `None` before processing or without bins.
    #[must_use]
    pub fn x_domain(&self) -> Option<(f64, f64)> {
        self.data.x_domain()
    }

    /// Published y domain, `None` before processing or without bins.
    #[must_use]
    pub fn y_domain(&self) -> Option<(f64, f64)> {
        self.data.y_domain()
    }

    /// Projects the processed bins through the axis converters.
    pub fn create_node_data<X, Y>(&mut self, x_scale: &X, y_scale: &Y) -> &[HistogramNodeDatum]
    where
        X: ValueToPixel + ?Sized,
        Y: ValueToPixel + ?Sized,
    {
        let params = NodeDataParams {
            area_plot: self.data.area_plot(),
            has_value_key: self.data.has_value_key(),
            style: &self.config.style,
            label: &self.config.label,
            label_formatter: self.label_formatter.as_ref(),
        };
        self.node_data = build_node_data(self.data.bins(), x_scale, y_scale, params);
        self.invalidation = self
            .invalidation
            .without_topic(InvalidationTopic::Axis)
            .with_topic(InvalidationTopic::Style);
        &self.node_data
    }

    #[must_use]
    pub fn node_data(&self) -> &[HistogramNodeDatum] {
        &self.node_data
    }

    /// Runs a full pass.
    ///
    /// Data is reprocessed only when it was invalidated. `scales` receives
    /// the published x and y domains and returns the converters; it is not
    /// called when there are no bins, in which case the scene is emptied.
    pub fn run_pass<F, X, Y>(&mut self, scales: F) -> HistogramResult<SelectionUpdate>
    where
        F: FnOnce((f64, f64), (f64, f64)) -> HistogramResult<(X, Y)>,
        X: ValueToPixel,
        Y: ValueToPixel,
    {
        if self.invalidation.needs_processing() {
            self.process_data();
        }

        match (self.x_domain(), self.y_domain()) {
            (Some(x_domain), Some(y_domain)) => {
                let (x_scale, y_scale) = scales(x_domain, y_domain)?;
                self.create_node_data(&x_scale, &y_scale);
            }
            _ => {
                self.node_data.clear();
                self.invalidation = self.invalidation.without_topic(InvalidationTopic::Axis);
            }
        }

        let update = self.update_selection()?;
        debug!(
            series = %self.id,
            nodes = self.node_data.len(),
            entered = update.bars.entered,
            exited = update.bars.exited,
            "histogram pass complete"
        );
        Ok(update)
    }

    /// Registers a listener. Ids must be non-empty and unique per series.
    pub fn add_listener(&mut self, listener: Box<dyn SeriesListener>) -> HistogramResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(HistogramError::InvalidConfig(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.has_listener(&listener_id) {
            return Err(HistogramError::InvalidConfig(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    /// Removes a listener by id. Returns `true` when removed.
    pub fn remove_listener(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners
            .iter()
            .any(|listener| listener.id() == listener_id)
    }

    pub(super) fn emit(&mut self, event: &SeriesEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

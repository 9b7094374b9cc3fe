//! chart-histogram: histogram series pipeline for retained-mode charts.
//!
//! Records are binned into contiguous numeric ranges, aggregated per bin,
//! projected to pixel geometry through host-supplied axis converters and
//! reconciled into long-lived scene nodes with a keyed enter/update/exit join.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{HistogramSeries, HistogramSeriesConfig};
pub use error::{HistogramError, HistogramResult};

pub mod aggregation;
pub mod bin;
pub mod binner;
pub mod boundaries;
pub mod extent;
pub mod processing;
pub mod record;
pub mod scale;
pub mod ticks;
pub mod types;

pub use aggregation::{Aggregation, aggregate_bins};
pub use bin::HistogramBin;
pub use binner::{BinRecord, place_in_bins};
pub use boundaries::{BinningStrategy, DEFAULT_BIN_COUNT, derive_boundaries, nice_boundaries};
pub use extent::{ExtentFix, PaddedExtentFix, continuous_extent};
pub use processing::{BinningOptions, HistogramData, process_histogram};
pub use record::{FieldAccessor, FieldValue, KeyedRecord, Record, continuous};
pub use scale::{LinearScale, ValueToPixel};
pub use ticks::{TickLadder, tick_ladder, tick_step, ticks};
pub use types::{BinDomain, Viewport};

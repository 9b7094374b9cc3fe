use serde::{Deserialize, Serialize};

use crate::core::BinDomain;

use super::SelectionUpdate;

/// Events a histogram series emits to registered listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesEvent {
    DataProcessed { bins: usize, binned_records: usize },
    SelectionUpdated { update: SelectionUpdate },
    NodeClick {
        bin_index: usize,
        domain: BinDomain,
        x_key: String,
    },
    HighlightChanged { node_index: Option<usize> },
}

/// Observer hook for series events.
///
/// Listeners read events only; they cannot mutate the series.
pub trait SeriesListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &SeriesEvent);
}

use serde::{Deserialize, Serialize};

/// Reason a histogram series needs another pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// Records or binning/aggregation config changed: rebin.
    Data,
    /// Axis converters changed: rebuild node data.
    Axis,
    /// Styling or highlight changed: re-run node updates.
    Style,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Data => 1 << 0,
            Self::Axis => 1 << 1,
            Self::Style => 1 << 2,
        }
    }
}

/// Bitmask of pending invalidation topics for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeriesInvalidation {
    bits: u8,
}

impl SeriesInvalidation {
    const ALL_BITS: u8 = InvalidationTopic::Data.bit()
        | InvalidationTopic::Axis.bit()
        | InvalidationTopic::Style.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn without_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits & !topic.bit(),
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Data processing must run before node data is rebuilt.
    #[must_use]
    pub const fn needs_processing(self) -> bool {
        self.contains_topic(InvalidationTopic::Data)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationTopic, SeriesInvalidation};

    #[test]
    fn clearing_data_keeps_other_topics() {
        let pending = SeriesInvalidation::all().without_topic(InvalidationTopic::Data);

        assert!(!pending.needs_processing());
        assert!(pending.contains_topic(InvalidationTopic::Axis));
        assert!(pending.contains_topic(InvalidationTopic::Style));
        assert!(
            pending
                .without_topic(InvalidationTopic::Axis)
                .without_topic(InvalidationTopic::Style)
                .is_none()
        );
        assert!(SeriesInvalidation::none().with_topic(InvalidationTopic::Data).needs_processing());
    }
}

use crate::core::BinDomain;

/// One slice of the x-domain with the records that fell into it.
///
/// `frequency` is derived from the member list, so it can never disagree with
/// it. Bins are rebuilt from scratch on every processing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin<T> {
    domain: BinDomain,
    members: Vec<T>,
    aggregated_value: f64,
}

impl<T> HistogramBin<T> {
    #[must_use]
    pub fn new(domain: BinDomain) -> Self {
        Self {
            domain,
            members: Vec::new(),
            aggregated_value: 0.0,
        }
    }

    pub(crate) fn push(&mut self, record: T) {
        self.members.push(record);
    }

    pub(crate) fn set_aggregated_value(&mut self, value: f64) {
        self.aggregated_value = value;
    }

    #[must_use]
    pub fn domain(&self) -> BinDomain {
        self.domain
    }

    /// Members in ascending x order.
    #[must_use]
    pub fn members(&self) -> &[T] {
        &self.members
    }

    #[must_use]
    pub fn frequency(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn aggregated_value(&self) -> f64 {
        self.aggregated_value
    }

    #[must_use]
    pub fn domain_width(&self) -> f64 {
        self.domain.width()
    }

    /// Aggregate per unit of x, used by area (density) plots.
    #[must_use]
    pub fn relative_height(&self) -> f64 {
        self.aggregated_value / self.domain_width()
    }

    /// Value plotted on the y-axis for this bin.
    ///
    /// Area plots use the density; otherwise the aggregate when a value key is
    /// configured, else the raw frequency.
    #[must_use]
    pub fn plotted_value(&self, area_plot: bool, has_value_key: bool) -> f64 {
        if area_plot {
            self.relative_height()
        } else if has_value_key {
            self.aggregated_value
        } else {
            self.frequency() as f64
        }
    }
}

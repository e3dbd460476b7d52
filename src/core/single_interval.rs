use crate::core::continuous::{DEFAULT_NUM_MINOR_TICKS, multiples_of_interval};
use crate::core::types::{TickSpec, validate_request};
use crate::error::{TickError, TickResult};

/// Ticker with one fixed spacing, independent of the requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleIntervalTicker {
    interval: f64,
    num_minor_ticks: usize,
}

impl SingleIntervalTicker {
    /// Creates a ticker spaced by `interval`, which must be finite and > 0.
    pub fn new(interval: f64) -> TickResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(TickError::InvalidConfiguration(format!(
                "single interval must be finite and > 0, got {interval}"
            )));
        }
        Ok(Self {
            interval,
            num_minor_ticks: DEFAULT_NUM_MINOR_TICKS,
        })
    }

    #[must_use]
    pub fn with_num_minor_ticks(mut self, num_minor_ticks: usize) -> Self {
        self.num_minor_ticks = num_minor_ticks;
        self
    }

    #[must_use]
    pub fn fixed_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn num_minor_ticks(&self) -> usize {
        self.num_minor_ticks
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.interval
    }

    /// Returns the fixed interval; range and tick count only go through validation.
    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        validate_request(low, high, desired_n_ticks)?;
        Ok(self.interval)
    }

    pub fn ticks(
        &self,
        low: f64,
        high: f64,
        _cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        validate_request(low, high, desired_n_ticks)?;
        self.compute_ticks(low, high)
    }

    pub(crate) fn compute_ticks(&self, low: f64, high: f64) -> TickResult<TickSpec> {
        multiples_of_interval(low, high, self.interval, self.num_minor_ticks)
    }
}

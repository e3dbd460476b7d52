use tracing::{debug, trace, warn};

use crate::core::ticker::Ticker;
use crate::core::types::{TickSpec, argmin, validate_request};
use crate::error::{TickError, TickResult};

/// Delegates to whichever sub-ticker best matches the requested tick count.
///
/// Sub-tickers are ordered by increasing interval so that
/// `max_interval(i) <= min_interval(i + 1)`; construction rejects any
/// other ordering because the selection is a binary search over the
/// interval bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTicker {
    tickers: Vec<Ticker>,
    min_intervals: Vec<f64>,
    max_intervals: Vec<f64>,
}

impl CompositeTicker {
    pub fn new(tickers: Vec<Ticker>) -> TickResult<Self> {
        if tickers.is_empty() {
            return Err(TickError::EmptyConfiguration(
                "composite ticker needs at least one sub-ticker".to_owned(),
            ));
        }

        let composite = Self::new_unchecked(tickers);
        let bounds = composite
            .max_intervals
            .iter()
            .zip(composite.min_intervals.iter().skip(1));
        for (index, (max, next_min)) in bounds.enumerate() {
            if !(max <= next_min) {
                warn!(
                    index,
                    max_interval = max,
                    next_min_interval = next_min,
                    "composite sub-tickers out of order"
                );
                return Err(TickError::InvalidConfiguration(format!(
                    "sub-ticker {index} max interval {max} exceeds sub-ticker {} min interval {next_min}",
                    index + 1
                )));
            }
        }

        debug!(
            sub_tickers = composite.tickers.len(),
            "composite ticker configured"
        );
        Ok(composite)
    }

    pub(crate) fn new_unchecked(tickers: Vec<Ticker>) -> Self {
        let min_intervals = tickers.iter().map(Ticker::min_interval).collect();
        let max_intervals = tickers.iter().map(Ticker::max_interval).collect();
        Self {
            tickers,
            min_intervals,
            max_intervals,
        }
    }

    #[must_use]
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    #[must_use]
    pub fn min_intervals(&self) -> &[f64] {
        &self.min_intervals
    }

    #[must_use]
    pub fn max_intervals(&self) -> &[f64] {
        &self.max_intervals
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.min_intervals.first().copied().unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.max_intervals.last().copied().unwrap_or(f64::NAN)
    }

    /// Picks the sub-ticker whose interval bounds best fit `desired_n_ticks`.
    ///
    /// Two candidates are compared: the last sub-ticker whose minimum
    /// interval is below the ideal interval, and the first whose maximum
    /// interval is not. The candidate with the smaller tick-count error
    /// wins, the first on a tie. When neither error is defined (empty or
    /// non-finite ranges) the first sub-ticker is returned.
    #[must_use]
    pub fn best_ticker(&self, low: f64, high: f64, desired_n_ticks: usize) -> &Ticker {
        self.best_ticker_index(low, high, desired_n_ticks)
            .and_then(|index| self.tickers.get(index))
            .unwrap_or(&self.tickers[0])
    }

    fn best_ticker_index(&self, low: f64, high: f64, desired_n_ticks: usize) -> Option<usize> {
        let data_range = high - low;
        let desired = desired_n_ticks as f64;
        let ideal_interval = data_range / desired;

        let below = self
            .min_intervals
            .partition_point(|interval| *interval < ideal_interval)
            .checked_sub(1);
        let above = self
            .max_intervals
            .partition_point(|interval| *interval < ideal_interval);

        let candidates = [
            below.and_then(|index| self.min_intervals.get(index).map(|interval| (index, *interval))),
            self.max_intervals
                .get(above)
                .map(|interval| (above, *interval)),
        ];
        let errors = candidates.map(|candidate| {
            candidate.map_or(f64::NAN, |(_, interval)| {
                (desired - data_range / interval).abs()
            })
        });

        let selected = argmin(&errors).and_then(|best| candidates[best].map(|(index, _)| index));
        trace!(
            ideal_interval,
            ?errors,
            ?selected,
            "composite ticker selection"
        );
        selected
    }

    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        validate_request(low, high, desired_n_ticks)?;
        Ok(self.compute_interval(low, high, desired_n_ticks))
    }

    pub fn ticks(
        &self,
        low: f64,
        high: f64,
        cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        validate_request(low, high, desired_n_ticks)?;
        self.compute_ticks(low, high, cross_loc, desired_n_ticks)
    }

    pub(crate) fn compute_interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> f64 {
        self.best_ticker(low, high, desired_n_ticks)
            .compute_interval(low, high, desired_n_ticks)
    }

    pub(crate) fn compute_ticks(
        &self,
        low: f64,
        high: f64,
        cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        self.best_ticker(low, high, desired_n_ticks)
            .compute_ticks(low, high, cross_loc, desired_n_ticks)
    }
}

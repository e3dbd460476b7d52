use smallvec::SmallVec;

use crate::core::continuous::{DEFAULT_NUM_MINOR_TICKS, multiples_of_interval};
use crate::core::types::{TickSpec, argmin, validate_request};
use crate::error::{TickError, TickResult};

type Mantissas = SmallVec<[f64; 8]>;

/// Ticker that picks a "nice" interval of the form `mantissa * base^k`
/// (scaled by `min_interval` when that is non-zero) and clamps it to
/// `[min_interval, max_interval]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveTicker {
    mantissas: Mantissas,
    base: f64,
    min_interval: f64,
    max_interval: Option<f64>,
    num_minor_ticks: usize,
    extended_mantissas: Mantissas,
    base_factor: f64,
}

impl AdaptiveTicker {
    pub const DEFAULT_MANTISSAS: [f64; 3] = [1.0, 2.0, 5.0];
    pub const DEFAULT_BASE: f64 = 10.0;

    pub fn new(
        mantissas: &[f64],
        base: f64,
        min_interval: f64,
        max_interval: Option<f64>,
    ) -> TickResult<Self> {
        if mantissas.is_empty() {
            return Err(TickError::EmptyConfiguration(
                "adaptive ticker needs at least one mantissa".to_owned(),
            ));
        }
        if mantissas.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(TickError::InvalidConfiguration(
                "adaptive mantissas must be finite and > 0".to_owned(),
            ));
        }
        if !base.is_finite() || base <= 1.0 {
            return Err(TickError::InvalidConfiguration(format!(
                "adaptive base must be finite and > 1, got {base}"
            )));
        }
        if !min_interval.is_finite() || min_interval < 0.0 {
            return Err(TickError::InvalidConfiguration(format!(
                "adaptive min interval must be finite and >= 0, got {min_interval}"
            )));
        }
        if let Some(max) = max_interval {
            if !max.is_finite() || max < min_interval {
                return Err(TickError::InvalidConfiguration(format!(
                    "adaptive max interval must be finite and >= {min_interval}, got {max}"
                )));
            }
        }

        Ok(Self::new_unchecked(
            mantissas,
            base,
            min_interval,
            max_interval,
        ))
    }

    /// Mantissas 1/2/5, base 10, no interval bounds.
    #[must_use]
    pub fn basic() -> Self {
        Self::new_unchecked(&Self::DEFAULT_MANTISSAS, Self::DEFAULT_BASE, 0.0, None)
    }

    pub(crate) fn new_unchecked(
        mantissas: &[f64],
        base: f64,
        min_interval: f64,
        max_interval: Option<f64>,
    ) -> Self {
        let mantissas: Mantissas = mantissas.iter().copied().collect();
        let mut extended_mantissas = Mantissas::with_capacity(mantissas.len() + 2);
        if let (Some(first), Some(last)) = (mantissas.first(), mantissas.last()) {
            extended_mantissas.push(last / base);
            extended_mantissas.extend(mantissas.iter().copied());
            extended_mantissas.push(first * base);
        }
        let base_factor = if min_interval == 0.0 { 1.0 } else { min_interval };

        Self {
            mantissas,
            base,
            min_interval,
            max_interval,
            num_minor_ticks: DEFAULT_NUM_MINOR_TICKS,
            extended_mantissas,
            base_factor,
        }
    }

    #[must_use]
    pub fn with_num_minor_ticks(mut self, num_minor_ticks: usize) -> Self {
        self.num_minor_ticks = num_minor_ticks;
        self
    }

    #[must_use]
    pub fn mantissas(&self) -> &[f64] {
        &self.mantissas
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    #[must_use]
    pub fn num_minor_ticks(&self) -> usize {
        self.num_minor_ticks
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.max_interval.unwrap_or(f64::INFINITY)
    }

    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        validate_request(low, high, desired_n_ticks)?;
        Ok(self.compute_interval(low, high, desired_n_ticks))
    }

    pub fn ticks(
        &self,
        low: f64,
        high: f64,
        _cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        validate_request(low, high, desired_n_ticks)?;
        self.compute_ticks(low, high, desired_n_ticks)
    }

    pub(crate) fn compute_interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> f64 {
        let data_range = high - low;
        let desired = desired_n_ticks as f64;
        let ideal_interval = data_range / desired;

        let exponent = ((ideal_interval / self.base_factor).ln() / self.base.ln()).floor();
        let ideal_magnitude = self.base.powf(exponent) * self.base_factor;

        let errors: Mantissas = self
            .extended_mantissas
            .iter()
            .map(|mantissa| (desired - data_range / (mantissa * ideal_magnitude)).abs())
            .collect();

        // A zero-width range leaves every error undefined.
        let Some(best) = argmin(&errors) else {
            return self.min_interval;
        };
        let interval = self.extended_mantissas[best] * ideal_magnitude;
        interval.clamp(self.min_interval, self.max_interval())
    }

    pub(crate) fn compute_ticks(
        &self,
        low: f64,
        high: f64,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        let interval = self.compute_interval(low, high, desired_n_ticks);
        multiples_of_interval(low, high, interval, self.num_minor_ticks)
    }
}

impl Default for AdaptiveTicker {
    fn default() -> Self {
        Self::basic()
    }
}

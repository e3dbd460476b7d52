use serde::{Deserialize, Serialize};

use crate::error::{TickError, TickResult};

/// Default tick count requested by an axis when the caller does not pass one.
pub const DEFAULT_DESIRED_NUM_TICKS: usize = 6;

/// Upper bound on candidate tick factors a single call may enumerate.
pub const MAX_TICK_FACTORS: u64 = 100_000;

/// Major and minor tick positions produced by a ticker.
///
/// For datetime tickers both sequences hold milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    pub major: Vec<f64>,
    pub minor: Vec<f64>,
}

impl TickSpec {
    #[must_use]
    pub fn new(major: Vec<f64>, minor: Vec<f64>) -> Self {
        Self { major, minor }
    }

    #[must_use]
    pub fn major_only(major: Vec<f64>) -> Self {
        Self {
            major,
            minor: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.major.is_empty() && self.minor.is_empty()
    }
}

pub(crate) fn validate_range(low: f64, high: f64) -> TickResult<()> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(TickError::InvalidRange { low, high });
    }
    Ok(())
}

pub(crate) fn validate_request(low: f64, high: f64, desired_n_ticks: usize) -> TickResult<()> {
    validate_range(low, high)?;
    if desired_n_ticks == 0 {
        return Err(TickError::InvalidTickCount);
    }
    Ok(())
}

#[inline]
pub(crate) fn in_range(value: f64, low: f64, high: f64) -> bool {
    low <= value && value <= high
}

/// Index of the smallest non-NaN value; the first one wins on ties.
pub(crate) fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().copied().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmin_skips_nan_and_prefers_first_on_ties() {
        assert_eq!(argmin(&[f64::NAN, 3.0, 1.0, 1.0]), Some(2));
        assert_eq!(argmin(&[2.0, 2.0]), Some(0));
        assert_eq!(argmin(&[f64::NAN, f64::NAN]), None);
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn reversed_or_non_finite_ranges_are_rejected() {
        assert!(validate_range(0.0, 0.0).is_ok());
        assert!(validate_range(1.0, 0.0).is_err());
        assert!(validate_range(f64::NAN, 1.0).is_err());
        assert!(matches!(
            validate_request(0.0, 1.0, 0),
            Err(TickError::InvalidTickCount)
        ));
    }
}

use tracing::{trace, warn};

use crate::core::types::{MAX_TICK_FACTORS, TickSpec, in_range};
use crate::error::{TickError, TickResult};

/// Default number of minor subdivisions per major interval.
pub const DEFAULT_NUM_MINOR_TICKS: usize = 5;

/// Places major ticks on every multiple of `interval` inside `[low, high]`
/// and subdivides each major interval into `num_minor_ticks` minor steps.
///
/// Minor ticks also extend backwards from the first major tick so the
/// leading partial interval is covered. A non-finite or non-positive
/// interval produces no ticks.
pub(crate) fn multiples_of_interval(
    low: f64,
    high: f64,
    interval: f64,
    num_minor_ticks: usize,
) -> TickResult<TickSpec> {
    if !interval.is_finite() || interval <= 0.0 {
        return Ok(TickSpec::default());
    }

    let start_factor = (low / interval).floor();
    let end_factor = (high / interval).ceil();
    if !start_factor.is_finite() || !end_factor.is_finite() {
        return Ok(TickSpec::default());
    }

    let factor_count = end_factor - start_factor + 1.0;
    if factor_count > MAX_TICK_FACTORS as f64 {
        warn!(
            low,
            high,
            interval,
            factor_count,
            "refusing to enumerate tick factors"
        );
        return Err(TickError::TooManyTicks {
            count: factor_count as u64,
            limit: MAX_TICK_FACTORS,
        });
    }

    let major: Vec<f64> = (0..factor_count as u64)
        .map(|offset| (start_factor + offset as f64) * interval)
        .filter(|tick| in_range(*tick, low, high))
        .collect();

    let mut minor = Vec::new();
    if num_minor_ticks > 0 {
        if let Some(&first) = major.first() {
            let minor_interval = interval / num_minor_ticks as f64;
            let offsets: Vec<f64> = (0..num_minor_ticks)
                .map(|index| index as f64 * minor_interval)
                .collect();

            for offset in offsets.iter().skip(1) {
                let tick = first - offset;
                if in_range(tick, low, high) {
                    minor.push(tick);
                }
            }
            for tick in &major {
                for offset in &offsets {
                    let candidate = tick + offset;
                    if in_range(candidate, low, high) {
                        minor.push(candidate);
                    }
                }
            }
        }
    }

    trace!(
        interval,
        major = major.len(),
        minor = minor.len(),
        "continuous ticks"
    );
    Ok(TickSpec::new(major, minor))
}

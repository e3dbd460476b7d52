//! UTC calendar helpers shared by the calendar-aware tickers and the
//! datetime formatter.
//!
//! `ONE_MONTH` and `ONE_YEAR` are fixed approximations used only to compare
//! interval magnitudes. Actual tick dates are produced with real calendar
//! arithmetic (`month_starts`, `year_starts`).

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use tracing::warn;

use crate::core::types::MAX_TICK_FACTORS;
use crate::error::{TickError, TickResult};

pub const ONE_MILLI: f64 = 1.0;
pub const ONE_SECOND: f64 = 1_000.0;
pub const ONE_MINUTE: f64 = 60.0 * ONE_SECOND;
pub const ONE_HOUR: f64 = 60.0 * ONE_MINUTE;
pub const ONE_DAY: f64 = 24.0 * ONE_HOUR;
pub const ONE_MONTH: f64 = 30.0 * ONE_DAY;
pub const ONE_YEAR: f64 = 365.0 * ONE_DAY;

/// Converts a millisecond timestamp to a UTC datetime.
///
/// Fractional milliseconds are floored so pre-epoch values land in the
/// correct calendar second. Returns `None` for non-finite values or values
/// outside chrono's representable range.
#[must_use]
pub fn datetime_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    let floored = millis.floor();
    if floored < (i64::MIN as f64) || floored > (i64::MAX as f64) {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(floored as i64)
}

#[must_use]
pub fn datetime_to_millis(date: DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64
}

#[must_use]
pub fn copy_date(date: &DateTime<Utc>) -> DateTime<Utc> {
    *date
}

/// Returns midnight UTC on the first day of `date`'s month.
#[must_use]
pub fn truncate_to_month(date: DateTime<Utc>) -> DateTime<Utc> {
    let first = date.date_naive() - Days::new(u64::from(date.day0()));
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Returns midnight UTC on January 1st of `date`'s year.
#[must_use]
pub fn truncate_to_year(date: DateTime<Utc>) -> DateTime<Utc> {
    let first = date.date_naive() - Days::new(u64::from(date.ordinal0()));
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC of `(year, month0 + 1, day)`, or `None` when that day does
/// not exist (e.g. 31 April).
#[must_use]
pub fn utc_date(year: i32, month0: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month0 + 1, day).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Steps a month-start datetime by `step` whole months.
#[must_use]
pub fn add_months(month_start: DateTime<Utc>, step: i64) -> Option<DateTime<Utc>> {
    let total_months = i64::from(month_start.year()) * 12 + i64::from(month_start.month0()) + step;
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total_months.rem_euclid(12)).ok()?;
    utc_date(year, month0, 1)
}

/// Month starts from `truncate_to_month(low)` through one month past
/// `truncate_to_month(high)`, inclusive.
///
/// `per_month` is the number of candidates the caller derives from each
/// month start. The range is rejected with `TooManyTicks` before any date is
/// built when the total would exceed `MAX_TICK_FACTORS`.
pub(crate) fn month_starts(
    low: f64,
    high: f64,
    per_month: usize,
) -> TickResult<Vec<DateTime<Utc>>> {
    let (start, end) = truncated_bounds(low, high, truncate_to_month)?;
    let months = month_index(end) - month_index(start) + 2;
    check_candidate_count(low, high, months, per_month)?;
    let end = add_months(end, 1).ok_or(TickError::InvalidRange { low, high })?;

    let mut dates = Vec::new();
    let mut date = start;
    while date <= end {
        dates.push(copy_date(&date));
        date = add_months(date, 1).ok_or(TickError::InvalidRange { low, high })?;
    }
    Ok(dates)
}

/// Year starts from `truncate_to_year(low)` through one year past
/// `truncate_to_year(high)`, inclusive. `per_year` bounds the candidate
/// count the same way `per_month` does for [`month_starts`].
pub(crate) fn year_starts(
    low: f64,
    high: f64,
    per_year: usize,
) -> TickResult<Vec<DateTime<Utc>>> {
    let (start, end) = truncated_bounds(low, high, truncate_to_year)?;
    let years = i64::from(end.year()) - i64::from(start.year()) + 2;
    check_candidate_count(low, high, years, per_year)?;
    let end = add_months(end, 12).ok_or(TickError::InvalidRange { low, high })?;

    let mut dates = Vec::new();
    let mut date = start;
    while date <= end {
        dates.push(copy_date(&date));
        date = add_months(date, 12).ok_or(TickError::InvalidRange { low, high })?;
    }
    Ok(dates)
}

fn month_index(date: DateTime<Utc>) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn check_candidate_count(low: f64, high: f64, units: i64, per_unit: usize) -> TickResult<()> {
    let units = u64::try_from(units).unwrap_or(0);
    let per_unit = u64::try_from(per_unit).unwrap_or(u64::MAX);
    let candidates = units.saturating_mul(per_unit);
    if candidates > MAX_TICK_FACTORS {
        warn!(low, high, candidates, "refusing to enumerate calendar ticks");
        return Err(TickError::TooManyTicks {
            count: candidates,
            limit: MAX_TICK_FACTORS,
        });
    }
    Ok(())
}

fn truncated_bounds(
    low: f64,
    high: f64,
    truncate: fn(DateTime<Utc>) -> DateTime<Utc>,
) -> TickResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = datetime_from_millis(low).ok_or(TickError::InvalidRange { low, high })?;
    let end = datetime_from_millis(high).ok_or(TickError::InvalidRange { low, high })?;
    Ok((truncate(start), truncate(end)))
}

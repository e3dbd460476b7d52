//! Calendar-aware tickers that only mark a fixed subset of days-of-month,
//! months-of-year, or whole years.
//!
//! Each one enumerates candidates over a range padded by one calendar unit
//! past `high`, then keeps only ticks inside `[low, high]`.

use chrono::{Datelike, DateTime, Utc};
use tracing::trace;

use crate::core::adaptive::AdaptiveTicker;
use crate::core::calendar::{
    ONE_DAY, ONE_MONTH, ONE_YEAR, datetime_from_millis, datetime_to_millis, month_starts,
    utc_date, year_starts,
};
use crate::core::types::{TickSpec, in_range, validate_request};
use crate::error::{TickError, TickResult};

/// Marks the configured days of every month.
#[derive(Debug, Clone, PartialEq)]
pub struct DaysTicker {
    days: Vec<u32>,
    interval: f64,
}

impl DaysTicker {
    /// `days` must be strictly ascending day-of-month numbers in `1..=31`.
    ///
    /// The interval is the gap between the first two days, or 31 days when
    /// only one day is configured.
    pub fn new(days: Vec<u32>) -> TickResult<Self> {
        if days.is_empty() {
            return Err(TickError::EmptyConfiguration(
                "days ticker needs at least one day".to_owned(),
            ));
        }
        if days.iter().any(|day| !(1..=31).contains(day)) {
            return Err(TickError::InvalidConfiguration(format!(
                "days must be in 1..=31, got {days:?}"
            )));
        }
        if !is_strictly_ascending(&days) {
            return Err(TickError::InvalidConfiguration(format!(
                "days must be strictly ascending, got {days:?}"
            )));
        }
        Ok(Self::new_unchecked(days))
    }

    /// Every `step`-th day starting from the 1st, up to and including `last`.
    pub fn every(step: u32, last: u32) -> TickResult<Self> {
        if step == 0 {
            return Err(TickError::InvalidConfiguration(
                "day step must be > 0".to_owned(),
            ));
        }
        Self::new((1..=last).step_by(step as usize).collect())
    }

    pub(crate) fn new_unchecked(days: Vec<u32>) -> Self {
        let interval = match days.as_slice() {
            [first, second, ..] => f64::from(second - first) * ONE_DAY,
            _ => 31.0 * ONE_DAY,
        };
        Self { days, interval }
    }

    #[must_use]
    pub fn days(&self) -> &[u32] {
        &self.days
    }

    #[must_use]
    pub fn fixed_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.interval
    }

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
        let half_interval = self.interval / 2.0;
        let mut major = Vec::new();

        for month_start in month_starts(low, high, self.days.len())? {
            for &day in &self.days {
                let Some(day_date) = utc_date(month_start.year(), month_start.month0(), day)
                else {
                    continue;
                };
                // Days too close to the end of a short month would crowd the
                // next month's first tick.
                let tick = datetime_to_millis(day_date);
                if !same_month(tick + half_interval, month_start) {
                    continue;
                }
                if in_range(tick, low, high) {
                    major.push(tick);
                }
            }
        }

        trace!(days = ?self.days, major = major.len(), "days ticks");
        Ok(TickSpec::major_only(major))
    }
}

/// Marks the configured months (0-based) of every year, on the 1st.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthsTicker {
    months: Vec<u32>,
    interval: f64,
}

impl MonthsTicker {
    /// `months` must be strictly ascending 0-based month indices in `0..=11`.
    ///
    /// The interval is the gap between the first two months, or 12 months
    /// when only one month is configured.
    pub fn new(months: Vec<u32>) -> TickResult<Self> {
        if months.is_empty() {
            return Err(TickError::EmptyConfiguration(
                "months ticker needs at least one month".to_owned(),
            ));
        }
        if months.iter().any(|month| *month > 11) {
            return Err(TickError::InvalidConfiguration(format!(
                "months must be in 0..=11, got {months:?}"
            )));
        }
        if !is_strictly_ascending(&months) {
            return Err(TickError::InvalidConfiguration(format!(
                "months must be strictly ascending, got {months:?}"
            )));
        }
        Ok(Self::new_unchecked(months))
    }

    /// Every `step`-th month starting from January.
    pub fn every(step: u32) -> TickResult<Self> {
        if step == 0 {
            return Err(TickError::InvalidConfiguration(
                "month step must be > 0".to_owned(),
            ));
        }
        Self::new((0..12).step_by(step as usize).collect())
    }

    pub(crate) fn new_unchecked(months: Vec<u32>) -> Self {
        let interval = match months.as_slice() {
            [first, second, ..] => f64::from(second - first) * ONE_MONTH,
            _ => 12.0 * ONE_MONTH,
        };
        Self { months, interval }
    }

    #[must_use]
    pub fn months(&self) -> &[u32] {
        &self.months
    }

    #[must_use]
    pub fn fixed_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.interval
    }

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
        let mut major = Vec::new();
        for year_start in year_starts(low, high, self.months.len())? {
            for &month in &self.months {
                let Some(month_date) = utc_date(year_start.year(), month, 1) else {
                    continue;
                };
                let tick = datetime_to_millis(month_date);
                if in_range(tick, low, high) {
                    major.push(tick);
                }
            }
        }

        trace!(months = ?self.months, major = major.len(), "months ticks");
        Ok(TickSpec::major_only(major))
    }
}

/// Marks January 1st of "nice" years chosen by a 1/2/5 adaptive ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct YearsTicker {
    year_ticker: AdaptiveTicker,
}

impl YearsTicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            year_ticker: AdaptiveTicker::basic().with_num_minor_ticks(0),
        }
    }

    #[must_use]
    pub fn fixed_interval(&self) -> f64 {
        ONE_YEAR
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        ONE_YEAR
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        ONE_YEAR
    }

    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        validate_request(low, high, desired_n_ticks)?;
        Ok(ONE_YEAR)
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

    pub(crate) fn compute_ticks(
        &self,
        low: f64,
        high: f64,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        let start_year = year_of(low, low, high)?;
        let end_year = year_of(high, low, high)?;

        let years = self
            .year_ticker
            .compute_ticks(f64::from(start_year), f64::from(end_year), desired_n_ticks)?
            .major;

        let mut major = Vec::with_capacity(years.len());
        for year in years {
            let Some(year) = whole_year(year) else {
                continue;
            };
            let Some(date) = utc_date(year, 0, 1) else {
                continue;
            };
            let tick = datetime_to_millis(date);
            if in_range(tick, low, high) {
                major.push(tick);
            }
        }

        trace!(start_year, end_year, major = major.len(), "years ticks");
        Ok(TickSpec::major_only(major))
    }
}

impl Default for YearsTicker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_strictly_ascending(values: &[u32]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

fn same_month(millis: f64, month_start: DateTime<Utc>) -> bool {
    datetime_from_millis(millis).is_some_and(|date| {
        date.year() == month_start.year() && date.month() == month_start.month()
    })
}

fn year_of(millis: f64, low: f64, high: f64) -> TickResult<i32> {
    datetime_from_millis(millis)
        .map(|date| date.year())
        .ok_or(TickError::InvalidRange { low, high })
}

fn whole_year(value: f64) -> Option<i32> {
    let rounded = value.round();
    let tolerance = 1e-9 * rounded.abs().max(1.0);
    if (value - rounded).abs() > tolerance {
        return None;
    }
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn millis(year: i32, month0: u32, day: u32) -> f64 {
        datetime_to_millis(utc_date(year, month0, day).expect("valid date"))
    }

    #[test]
    fn days_interval_comes_from_first_gap() {
        let ticker = DaysTicker::new(vec![1, 8, 15, 22]).expect("valid");
        assert_relative_eq!(ticker.fixed_interval(), 7.0 * ONE_DAY);

        let single = DaysTicker::new(vec![15]).expect("valid");
        assert_relative_eq!(single.fixed_interval(), 31.0 * ONE_DAY);
    }

    #[test]
    fn every_third_day_skips_crowded_month_end() {
        let ticker = DaysTicker::every(3, 30).expect("valid");
        assert_eq!(ticker.days(), &[1, 4, 7, 10, 13, 16, 19, 22, 25, 28]);

        let low = millis(2023, 1, 1);
        let high = millis(2023, 2, 1);
        let spec = ticker.ticks(low, high, None, 6).expect("ticks");

        // 28 Feb + 1.5 days is in March, so the 28th is dropped.
        assert!(!spec.major.contains(&millis(2023, 1, 28)));
        assert_eq!(spec.major.first().copied(), Some(low));
        assert_eq!(spec.major.last().copied(), Some(high));
        assert_eq!(spec.major.len(), 10);
    }

    #[test]
    fn every_day_rejects_days_missing_from_short_months() {
        let ticker = DaysTicker::every(1, 31).expect("valid");
        let spec = ticker
            .ticks(millis(2022, 3, 1), millis(2022, 4, 1), None, 6)
            .expect("ticks");
        // 30 days of April plus 1 May.
        assert_eq!(spec.major.len(), 31);
        assert!(spec.minor.is_empty());
    }

    #[test]
    fn months_interval_and_ticks() {
        let ticker = MonthsTicker::every(4).expect("valid");
        assert_eq!(ticker.months(), &[0, 4, 8]);
        assert_relative_eq!(ticker.fixed_interval(), 4.0 * ONE_MONTH);

        let spec = ticker
            .ticks(millis(2021, 6, 15), millis(2022, 9, 1), None, 6)
            .expect("ticks");
        assert_eq!(
            spec.major,
            vec![millis(2021, 8, 1), millis(2022, 0, 1), millis(2022, 4, 1), millis(2022, 8, 1)]
        );
    }

    #[test]
    fn years_ticker_marks_january_first_of_nice_years() {
        let ticker = YearsTicker::new();
        let spec = ticker
            .ticks(millis(1995, 5, 1), millis(2031, 0, 1), None, 6)
            .expect("ticks");
        assert_eq!(
            spec.major,
            vec![
                millis(2000, 0, 1),
                millis(2005, 0, 1),
                millis(2010, 0, 1),
                millis(2015, 0, 1),
                millis(2020, 0, 1),
                millis(2025, 0, 1),
                millis(2030, 0, 1),
            ]
        );
    }

    #[test]
    fn absurd_calendar_ranges_are_rejected() {
        let days = DaysTicker::every(1, 31).expect("valid");
        let err = days
            .ticks(0.0, 1_000.0 * ONE_YEAR, None, 6)
            .expect_err("too many days");
        assert!(matches!(err, TickError::TooManyTicks { limit: 100_000, .. }));

        let months = MonthsTicker::every(1).expect("valid");
        let err = months
            .ticks(-8.0e15, 8.0e15, None, 6)
            .expect_err("too many months");
        assert!(matches!(err, TickError::TooManyTicks { .. }));

        // A century of monthly ticks is still well inside the limit.
        let spec = months
            .ticks(millis(1900, 0, 1), millis(2000, 0, 1), None, 6)
            .expect("ticks");
        assert_eq!(spec.major.len(), 1_201);
    }

    #[test]
    fn invalid_calendar_configuration_is_rejected() {
        assert!(matches!(
            DaysTicker::new(Vec::new()),
            Err(TickError::EmptyConfiguration(_))
        ));
        assert!(DaysTicker::new(vec![0, 5]).is_err());
        assert!(DaysTicker::new(vec![15, 1]).is_err());
        assert!(MonthsTicker::new(vec![12]).is_err());
        assert!(MonthsTicker::new(vec![3, 3]).is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::core::adaptive::AdaptiveTicker;
use crate::core::calendar::{ONE_HOUR, ONE_MILLI, ONE_MINUTE, ONE_SECOND};
use crate::core::calendar_ticker::{DaysTicker, MonthsTicker, YearsTicker};
use crate::core::composite::CompositeTicker;
use crate::core::continuous::DEFAULT_NUM_MINOR_TICKS;
use crate::core::single_interval::SingleIntervalTicker;
use crate::core::types::{DEFAULT_DESIRED_NUM_TICKS, TickSpec, validate_request};
use crate::error::{TickError, TickResult};

/// Every ticker variant behind one interface.
///
/// Intervals are in the axis' data units; for the calendar variants that is
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticker {
    SingleInterval(SingleIntervalTicker),
    Adaptive(AdaptiveTicker),
    Days(DaysTicker),
    Months(MonthsTicker),
    Years(YearsTicker),
    Composite(CompositeTicker),
}

impl Ticker {
    #[must_use]
    pub fn min_interval(&self) -> f64 {
        match self {
            Self::SingleInterval(ticker) => ticker.min_interval(),
            Self::Adaptive(ticker) => ticker.min_interval(),
            Self::Days(ticker) => ticker.min_interval(),
            Self::Months(ticker) => ticker.min_interval(),
            Self::Years(ticker) => ticker.min_interval(),
            Self::Composite(ticker) => ticker.min_interval(),
        }
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        match self {
            Self::SingleInterval(ticker) => ticker.max_interval(),
            Self::Adaptive(ticker) => ticker.max_interval(),
            Self::Days(ticker) => ticker.max_interval(),
            Self::Months(ticker) => ticker.max_interval(),
            Self::Years(ticker) => ticker.max_interval(),
            Self::Composite(ticker) => ticker.max_interval(),
        }
    }

    /// Spacing this ticker would use for `desired_n_ticks` over `[low, high]`.
    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        validate_request(low, high, desired_n_ticks)?;
        Ok(self.compute_interval(low, high, desired_n_ticks))
    }

    /// Major and minor tick positions inside `[low, high]`.
    ///
    /// `cross_loc` is accepted for parity with axis layout callers; none of
    /// the built-in tickers depend on it.
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

    /// [`Ticker::ticks`] with [`DEFAULT_DESIRED_NUM_TICKS`].
    pub fn default_ticks(&self, low: f64, high: f64, cross_loc: Option<f64>) -> TickResult<TickSpec> {
        self.ticks(low, high, cross_loc, DEFAULT_DESIRED_NUM_TICKS)
    }

    pub(crate) fn compute_interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> f64 {
        match self {
            Self::SingleInterval(ticker) => ticker.fixed_interval(),
            Self::Adaptive(ticker) => ticker.compute_interval(low, high, desired_n_ticks),
            Self::Days(ticker) => ticker.fixed_interval(),
            Self::Months(ticker) => ticker.fixed_interval(),
            Self::Years(ticker) => ticker.fixed_interval(),
            Self::Composite(ticker) => ticker.compute_interval(low, high, desired_n_ticks),
        }
    }

    pub(crate) fn compute_ticks(
        &self,
        low: f64,
        high: f64,
        cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        match self {
            Self::SingleInterval(ticker) => ticker.compute_ticks(low, high),
            Self::Adaptive(ticker) => ticker.compute_ticks(low, high, desired_n_ticks),
            Self::Days(ticker) => ticker.compute_ticks(low, high),
            Self::Months(ticker) => ticker.compute_ticks(low, high),
            Self::Years(ticker) => ticker.compute_ticks(low, high, desired_n_ticks),
            Self::Composite(ticker) => ticker.compute_ticks(low, high, cross_loc, desired_n_ticks),
        }
    }
}

impl From<SingleIntervalTicker> for Ticker {
    fn from(ticker: SingleIntervalTicker) -> Self {
        Self::SingleInterval(ticker)
    }
}

impl From<AdaptiveTicker> for Ticker {
    fn from(ticker: AdaptiveTicker) -> Self {
        Self::Adaptive(ticker)
    }
}

impl From<DaysTicker> for Ticker {
    fn from(ticker: DaysTicker) -> Self {
        Self::Days(ticker)
    }
}

impl From<MonthsTicker> for Ticker {
    fn from(ticker: MonthsTicker) -> Self {
        Self::Months(ticker)
    }
}

impl From<YearsTicker> for Ticker {
    fn from(ticker: YearsTicker) -> Self {
        Self::Years(ticker)
    }
}

impl From<CompositeTicker> for Ticker {
    fn from(ticker: CompositeTicker) -> Self {
        Self::Composite(ticker)
    }
}

impl From<DatetimeTicker> for Ticker {
    fn from(ticker: DatetimeTicker) -> Self {
        Self::Composite(ticker.into_composite())
    }
}

/// Composite ticker spanning sub-second through multi-year datetime axes.
///
/// Sub-tickers, in increasing interval order:
/// - sub-second: mantissas 1/2/5, base 10, up to 500ms
/// - seconds/minutes: mantissas 1/2/5/10/15/20/30, base 60, 1s..30min
/// - hours: mantissas 1/2/4/6/8/12, base 24, 1h..12h
/// - days: every day, every 3rd day, 1/8/15/22, 1/15
/// - months: every month, every 2nd, every 4th, every 6th
/// - years
///
/// None of them produce minor ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct DatetimeTicker {
    inner: CompositeTicker,
}

impl DatetimeTicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: CompositeTicker::new_unchecked(Self::sub_tickers()),
        }
    }

    pub(crate) fn sub_tickers() -> Vec<Ticker> {
        let adaptive = |mantissas: &[f64], base: f64, min: f64, max: f64| {
            Ticker::Adaptive(
                AdaptiveTicker::new_unchecked(mantissas, base, min, Some(max))
                    .with_num_minor_ticks(0),
            )
        };
        let days = |days: Vec<u32>| Ticker::Days(DaysTicker::new_unchecked(days));
        let months = |step: usize| {
            Ticker::Months(MonthsTicker::new_unchecked((0..12).step_by(step).collect()))
        };

        vec![
            adaptive(&[1.0, 2.0, 5.0], 10.0, 0.0, 500.0 * ONE_MILLI),
            adaptive(
                &[1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 30.0],
                60.0,
                ONE_SECOND,
                30.0 * ONE_MINUTE,
            ),
            adaptive(
                &[1.0, 2.0, 4.0, 6.0, 8.0, 12.0],
                24.0,
                ONE_HOUR,
                12.0 * ONE_HOUR,
            ),
            days((1..32).collect()),
            days((1..31).step_by(3).collect()),
            days(vec![1, 8, 15, 22]),
            days(vec![1, 15]),
            months(1),
            months(2),
            months(4),
            months(6),
            Ticker::Years(YearsTicker::new()),
        ]
    }

    #[must_use]
    pub fn as_composite(&self) -> &CompositeTicker {
        &self.inner
    }

    #[must_use]
    pub fn into_composite(self) -> CompositeTicker {
        self.inner
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.inner.min_interval()
    }

    #[must_use]
    pub fn max_interval(&self) -> f64 {
        self.inner.max_interval()
    }

    #[must_use]
    pub fn best_ticker(&self, low: f64, high: f64, desired_n_ticks: usize) -> &Ticker {
        self.inner.best_ticker(low, high, desired_n_ticks)
    }

    pub fn interval(&self, low: f64, high: f64, desired_n_ticks: usize) -> TickResult<f64> {
        self.inner.interval(low, high, desired_n_ticks)
    }

    pub fn ticks(
        &self,
        low: f64,
        high: f64,
        cross_loc: Option<f64>,
        desired_n_ticks: usize,
    ) -> TickResult<TickSpec> {
        self.inner.ticks(low, high, cross_loc, desired_n_ticks)
    }
}

impl Default for DatetimeTicker {
    fn default() -> Self {
        Self::new()
    }
}

fn default_num_minor_ticks() -> usize {
    DEFAULT_NUM_MINOR_TICKS
}

fn default_mantissas() -> Vec<f64> {
    AdaptiveTicker::DEFAULT_MANTISSAS.to_vec()
}

fn default_base() -> f64 {
    AdaptiveTicker::DEFAULT_BASE
}

/// Serializable ticker description.
///
/// `build` runs the same validation as the typed constructors, so a
/// configuration loaded from JSON can never yield an unordered composite or
/// an invalid day list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickerConfig {
    SingleInterval {
        interval: f64,
        #[serde(default = "default_num_minor_ticks")]
        num_minor_ticks: usize,
    },
    Adaptive {
        #[serde(default = "default_mantissas")]
        mantissas: Vec<f64>,
        #[serde(default = "default_base")]
        base: f64,
        #[serde(default)]
        min_interval: f64,
        #[serde(default)]
        max_interval: Option<f64>,
        #[serde(default = "default_num_minor_ticks")]
        num_minor_ticks: usize,
    },
    Days {
        days: Vec<u32>,
    },
    Months {
        months: Vec<u32>,
    },
    Years,
    Composite {
        tickers: Vec<TickerConfig>,
    },
    Datetime,
}

impl TickerConfig {
    pub fn build(&self) -> TickResult<Ticker> {
        let ticker = match self {
            Self::SingleInterval {
                interval,
                num_minor_ticks,
            } => SingleIntervalTicker::new(*interval)?
                .with_num_minor_ticks(*num_minor_ticks)
                .into(),
            Self::Adaptive {
                mantissas,
                base,
                min_interval,
                max_interval,
                num_minor_ticks,
            } => AdaptiveTicker::new(mantissas, *base, *min_interval, *max_interval)?
                .with_num_minor_ticks(*num_minor_ticks)
                .into(),
            Self::Days { days } => DaysTicker::new(days.clone())?.into(),
            Self::Months { months } => MonthsTicker::new(months.clone())?.into(),
            Self::Years => YearsTicker::new().into(),
            Self::Composite { tickers } => {
                let tickers = tickers
                    .iter()
                    .map(TickerConfig::build)
                    .collect::<TickResult<Vec<_>>>()?;
                CompositeTicker::new(tickers)?.into()
            }
            Self::Datetime => DatetimeTicker::new().into(),
        };
        Ok(ticker)
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self::Datetime
    }
}

impl TryFrom<&TickerConfig> for Ticker {
    type Error = TickError;

    fn try_from(config: &TickerConfig) -> TickResult<Self> {
        config.build()
    }
}

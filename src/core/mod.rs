pub mod adaptive;
pub mod calendar;
pub mod calendar_ticker;
pub mod composite;
pub mod continuous;
pub mod single_interval;
pub mod ticker;
pub mod types;

pub use adaptive::AdaptiveTicker;
pub use calendar::{ONE_DAY, ONE_HOUR, ONE_MILLI, ONE_MINUTE, ONE_MONTH, ONE_SECOND, ONE_YEAR};
pub use calendar_ticker::{DaysTicker, MonthsTicker, YearsTicker};
pub use composite::CompositeTicker;
pub use continuous::DEFAULT_NUM_MINOR_TICKS;
pub use single_interval::SingleIntervalTicker;
pub use ticker::{DatetimeTicker, Ticker, TickerConfig};
pub use types::{DEFAULT_DESIRED_NUM_TICKS, MAX_TICK_FACTORS, TickSpec};

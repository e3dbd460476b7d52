//! chart-ticks: axis tick placement and datetime tick labelling.
//!
//! The crate keeps the chart-engine split between a numeric `core` layer
//! (tickers producing tick positions) and an `api` layer (label formatting
//! and axis composition).

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DatetimeAxis, DatetimeTickFormatter, Resolution};
pub use core::{DatetimeTicker, TickSpec, Ticker, TickerConfig};
pub use error::{TickError, TickResult};

use thiserror::Error;

pub type TickResult<T> = Result<T, TickError>;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("invalid range: low={low}, high={high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("desired tick count must be > 0")]
    InvalidTickCount,

    #[error("empty configuration: {0}")]
    EmptyConfiguration(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("timestamp cannot be formatted: {0}")]
    InvalidTimestamp(f64),

    #[error("tick generation would produce {count} candidates (limit {limit})")]
    TooManyTicks { count: u64, limit: u64 },
}

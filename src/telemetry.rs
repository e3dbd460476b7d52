//! Opt-in `tracing` setup for applications embedding `chart-ticks`.
//!
//! The crate only emits events; it never installs a subscriber on its own.
//! Event targets follow the module paths:
//!
//! | Target | Level | Event |
//! |---|---|---|
//! | `chart_ticks::core::composite` | `debug` | composite ticker configured |
//! | `chart_ticks::core::composite` | `warn` | sub-tickers rejected as unordered |
//! | `chart_ticks::core::composite` | `trace` | sub-ticker chosen for a range |
//! | `chart_ticks::core::continuous` | `warn` | interval multiples over `MAX_TICK_FACTORS` |
//! | `chart_ticks::core::calendar` | `warn` | calendar candidates over `MAX_TICK_FACTORS` |
//! | `chart_ticks::core::continuous`, `chart_ticks::core::calendar_ticker` | `trace` | tick counts per call |
//! | `chart_ticks::api::datetime_formatter` | `trace` | resolution and label count |
//! | `chart_ticks::api::axis` | `debug` | axis layout summary |
//!
//! `RUST_LOG=chart_ticks::core=trace` is enough to follow ticker selection.

/// Filter used when `RUST_LOG` is unset. Only the `warn` events above pass.
pub const DEFAULT_TRACING_FILTER: &str = "info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is off or the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with caller-supplied fallback
/// directives, e.g. `"chart_ticks::core::composite=trace"`.
#[must_use]
pub fn init_tracing(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_is_refused() {
        let _ = init_default_tracing();
        assert!(!init_tracing("chart_ticks=trace"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn disabled_feature_installs_nothing() {
        assert!(!init_default_tracing());
    }
}

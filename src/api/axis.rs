use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::datetime_formatter::DatetimeTickFormatter;
use crate::core::ticker::{DatetimeTicker, Ticker, TickerConfig};
use crate::core::types::{DEFAULT_DESIRED_NUM_TICKS, validate_request};
use crate::error::TickResult;

/// Preferred pixel distance between neighbouring datetime labels.
pub const AXIS_TIME_TARGET_SPACING_PX: f64 = 72.0;

/// Tick count that spaces labels roughly `target_spacing_px` apart along an
/// axis `axis_span_px` long, clamped to `[min_ticks, max_ticks]`.
#[must_use]
pub fn tick_count_for_span(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks.max(min_ticks))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Labelled major ticks and bare minor positions for one axis range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTickLayout {
    /// Spacing the ticker chose for the range.
    pub interval: f64,
    pub major: Vec<AxisTick>,
    pub minor: Vec<f64>,
}

impl AxisTickLayout {
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.major.iter().map(|tick| tick.label.as_str()).collect()
    }
}

/// A ticker paired with a datetime formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct DatetimeAxis {
    pub ticker: Ticker,
    pub formatter: DatetimeTickFormatter,
    pub desired_num_ticks: usize,
}

impl Default for DatetimeAxis {
    fn default() -> Self {
        Self::new(DatetimeTicker::new().into(), DatetimeTickFormatter::default())
    }
}

impl DatetimeAxis {
    #[must_use]
    pub fn new(ticker: Ticker, formatter: DatetimeTickFormatter) -> Self {
        Self {
            ticker,
            formatter,
            desired_num_ticks: DEFAULT_DESIRED_NUM_TICKS,
        }
    }

    #[must_use]
    pub fn with_desired_num_ticks(mut self, desired_num_ticks: usize) -> Self {
        self.desired_num_ticks = desired_num_ticks;
        self
    }

    /// Sizes `desired_num_ticks` for an axis `axis_span_px` pixels long.
    #[must_use]
    pub fn fit_to_span(mut self, axis_span_px: f64) -> Self {
        self.desired_num_ticks = tick_count_for_span(axis_span_px, AXIS_TIME_TARGET_SPACING_PX, 2, 16);
        self
    }

    /// Computes and labels the ticks for `[low, high]` (epoch milliseconds).
    pub fn layout(&self, low: f64, high: f64, cross_loc: Option<f64>) -> TickResult<AxisTickLayout> {
        validate_request(low, high, self.desired_num_ticks)?;

        let interval = self.ticker.compute_interval(low, high, self.desired_num_ticks);
        let spec = self
            .ticker
            .compute_ticks(low, high, cross_loc, self.desired_num_ticks)?;
        let labels = self.formatter.format_ticks(&spec.major)?;

        debug!(
            low,
            high,
            interval,
            major = spec.major.len(),
            minor = spec.minor.len(),
            "datetime axis layout"
        );

        let major = spec
            .major
            .into_iter()
            .zip(labels)
            .map(|(value, label)| AxisTick { value, label })
            .collect();
        Ok(AxisTickLayout {
            interval,
            major,
            minor: spec.minor,
        })
    }
}

/// Serializable form of [`DatetimeAxis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeAxisConfig {
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub formatter: DatetimeTickFormatter,
    #[serde(default = "default_desired_num_ticks")]
    pub desired_num_ticks: usize,
}

fn default_desired_num_ticks() -> usize {
    DEFAULT_DESIRED_NUM_TICKS
}

impl Default for DatetimeAxisConfig {
    fn default() -> Self {
        Self {
            ticker: TickerConfig::default(),
            formatter: DatetimeTickFormatter::default(),
            desired_num_ticks: DEFAULT_DESIRED_NUM_TICKS,
        }
    }
}

impl DatetimeAxisConfig {
    pub fn build(&self) -> TickResult<DatetimeAxis> {
        let ticker = self.ticker.build()?;
        Ok(DatetimeAxis::new(ticker, self.formatter.clone())
            .with_desired_num_ticks(self.desired_num_ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TickError;

    #[test]
    fn tick_count_scales_with_axis_length() {
        assert_eq!(tick_count_for_span(0.0, 72.0, 2, 16), 2);
        assert_eq!(tick_count_for_span(720.0, 72.0, 2, 16), 11);
        assert_eq!(tick_count_for_span(10_000.0, 72.0, 2, 16), 16);
        assert_eq!(tick_count_for_span(720.0, f64::NAN, 2, 16), 2);
    }

    #[test]
    fn fit_to_span_uses_time_axis_spacing() {
        assert_eq!(DatetimeAxis::default().fit_to_span(720.0).desired_num_ticks, 11);
        assert_eq!(DatetimeAxis::default().fit_to_span(216.0).desired_num_ticks, 4);
        assert_eq!(DatetimeAxis::default().fit_to_span(0.0).desired_num_ticks, 2);
        assert_eq!(DatetimeAxis::default().fit_to_span(10_000.0).desired_num_ticks, 16);

        // A later explicit count still wins.
        let axis = DatetimeAxis::default().fit_to_span(720.0).with_desired_num_ticks(6);
        assert_eq!(axis.desired_num_ticks, 6);
    }

    #[test]
    fn layout_pairs_every_major_tick_with_a_label() {
        let axis = DatetimeAxis::default();
        // 2022-06-23T00:00Z to 2022-06-23T06:00Z.
        let layout = axis
            .layout(1_655_942_400_000.0, 1_655_964_000_000.0, None)
            .expect("layout");
        assert_eq!(layout.interval, 3_600_000.0);
        assert_eq!(layout.labels(), ["06/23", "01h", "02h", "03h", "04h", "05h", "06h"]);
        assert!(layout.minor.is_empty());
    }

    #[test]
    fn layout_rejects_bad_range() {
        let axis = DatetimeAxis::default();
        assert!(matches!(
            axis.layout(10.0, 0.0, None),
            Err(TickError::InvalidRange { .. })
        ));
        assert!(matches!(
            axis.clone().with_desired_num_ticks(0).layout(0.0, 10.0, None),
            Err(TickError::InvalidTickCount)
        ));
    }
}

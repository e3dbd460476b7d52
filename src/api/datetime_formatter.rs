use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::resolution::{Resolution, resolution_for};
use crate::api::strftime::{Tm, mktime, strftime};
use crate::error::{TickError, TickResult};

/// One strftime format per [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionFormats {
    pub microseconds: String,
    pub milliseconds: String,
    pub seconds: String,
    pub minsec: String,
    pub minutes: String,
    pub hourmin: String,
    pub hours: String,
    pub days: String,
    pub months: String,
    pub years: String,
}

impl ResolutionFormats {
    /// Builds a table by asking `format` for every resolution.
    pub fn from_fn(mut format: impl FnMut(Resolution) -> String) -> Self {
        Self {
            microseconds: format(Resolution::Microseconds),
            milliseconds: format(Resolution::Milliseconds),
            seconds: format(Resolution::Seconds),
            minsec: format(Resolution::Minsec),
            minutes: format(Resolution::Minutes),
            hourmin: format(Resolution::Hourmin),
            hours: format(Resolution::Hours),
            days: format(Resolution::Days),
            months: format(Resolution::Months),
            years: format(Resolution::Years),
        }
    }

    #[must_use]
    pub fn get(&self, resolution: Resolution) -> &str {
        match resolution {
            Resolution::Microseconds => &self.microseconds,
            Resolution::Milliseconds => &self.milliseconds,
            Resolution::Seconds => &self.seconds,
            Resolution::Minsec => &self.minsec,
            Resolution::Minutes => &self.minutes,
            Resolution::Hourmin => &self.hourmin,
            Resolution::Hours => &self.hours,
            Resolution::Days => &self.days,
            Resolution::Months => &self.months,
            Resolution::Years => &self.years,
        }
    }

    pub fn set(&mut self, resolution: Resolution, format: impl Into<String>) {
        let slot = match resolution {
            Resolution::Microseconds => &mut self.microseconds,
            Resolution::Milliseconds => &mut self.milliseconds,
            Resolution::Seconds => &mut self.seconds,
            Resolution::Minsec => &mut self.minsec,
            Resolution::Minutes => &mut self.minutes,
            Resolution::Hourmin => &mut self.hourmin,
            Resolution::Hours => &mut self.hours,
            Resolution::Days => &mut self.days,
            Resolution::Months => &mut self.months,
            Resolution::Years => &mut self.years,
        };
        *slot = format.into();
    }
}

impl Default for ResolutionFormats {
    fn default() -> Self {
        Self::from_fn(|resolution| {
            match resolution {
                Resolution::Microseconds => "%fus",
                Resolution::Milliseconds => "%3Nms",
                Resolution::Seconds => "%Ss",
                Resolution::Minsec => ":%M:%S",
                Resolution::Minutes => ":%M",
                Resolution::Hourmin => "%H:%M",
                Resolution::Hours => "%Hh",
                Resolution::Days => "%m/%d",
                Resolution::Months => "%m/%Y",
                Resolution::Years => "%Y",
            }
            .to_owned()
        })
    }
}

/// Which labels lose their leading zeros: all of them, or only labels that
/// were finally rendered at one of the listed resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StripLeadingZeros {
    All(bool),
    Only(Vec<Resolution>),
}

impl StripLeadingZeros {
    #[must_use]
    pub fn applies_to(&self, resolution: Resolution) -> bool {
        match self {
            Self::All(enabled) => *enabled,
            Self::Only(resolutions) => resolutions.contains(&resolution),
        }
    }
}

impl Default for StripLeadingZeros {
    fn default() -> Self {
        Self::All(false)
    }
}

impl From<bool> for StripLeadingZeros {
    fn from(enabled: bool) -> Self {
        Self::All(enabled)
    }
}

impl From<Vec<Resolution>> for StripLeadingZeros {
    fn from(resolutions: Vec<Resolution>) -> Self {
        Self::Only(resolutions)
    }
}

/// Secondary text attached to the primary tick labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatetimeContext {
    /// strftime format applied to each selected tick.
    Format(String),
    /// Formatter run over the same ticks at the parent's resolution.
    Formatter(Box<DatetimeTickFormatter>),
}

impl From<&str> for DatetimeContext {
    fn from(format: &str) -> Self {
        Self::Format(format.to_owned())
    }
}

impl From<String> for DatetimeContext {
    fn from(format: String) -> Self {
        Self::Format(format)
    }
}

impl From<DatetimeTickFormatter> for DatetimeContext {
    fn from(formatter: DatetimeTickFormatter) -> Self {
        Self::Formatter(Box::new(formatter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextWhich {
    #[default]
    Start,
    Center,
    End,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextLocation {
    Above,
    #[default]
    Below,
    Left,
    Right,
}

/// Formats datetime ticks (milliseconds since the epoch, UTC) with a
/// format chosen by the spacing of the ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeTickFormatter {
    #[serde(flatten)]
    pub formats: ResolutionFormats,
    pub strip_leading_zeros: StripLeadingZeros,
    /// Promote a label to the next coarser format when it falls on that
    /// format's boundary (e.g. midnight shows the date instead of `00h`).
    pub boundary_scaling: bool,
    pub hide_repeats: bool,
    pub context: Option<DatetimeContext>,
    pub context_which: ContextWhich,
    pub context_location: ContextLocation,
}

impl Default for DatetimeTickFormatter {
    fn default() -> Self {
        Self {
            formats: ResolutionFormats::default(),
            strip_leading_zeros: StripLeadingZeros::default(),
            boundary_scaling: true,
            hide_repeats: false,
            context: None,
            context_which: ContextWhich::default(),
            context_location: ContextLocation::default(),
        }
    }
}

impl DatetimeTickFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter meant to be used as a context: each resolution shows the
    /// next coarser unit (time of day for sub-second ticks, the date for
    /// hour ticks, and so on). Month and year ticks get no context.
    #[must_use]
    pub fn relative_context() -> Self {
        let formats = ResolutionFormats::from_fn(|resolution| {
            match resolution {
                Resolution::Microseconds | Resolution::Milliseconds => "%T",
                Resolution::Seconds => "%H:%M",
                Resolution::Minsec | Resolution::Minutes => "%Hh",
                Resolution::Hourmin | Resolution::Hours => "%F",
                Resolution::Days => "%Y",
                Resolution::Months | Resolution::Years => "",
            }
            .to_owned()
        });
        Self {
            formats,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, resolution: Resolution, format: impl Into<String>) -> Self {
        self.formats.set(resolution, format);
        self
    }

    #[must_use]
    pub fn with_formats(mut self, formats: ResolutionFormats) -> Self {
        self.formats = formats;
        self
    }

    #[must_use]
    pub fn with_strip_leading_zeros(mut self, strip: impl Into<StripLeadingZeros>) -> Self {
        self.strip_leading_zeros = strip.into();
        self
    }

    #[must_use]
    pub fn with_boundary_scaling(mut self, enabled: bool) -> Self {
        self.boundary_scaling = enabled;
        self
    }

    #[must_use]
    pub fn with_hide_repeats(mut self, enabled: bool) -> Self {
        self.hide_repeats = enabled;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<DatetimeContext>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_context_which(mut self, which: ContextWhich) -> Self {
        self.context_which = which;
        self
    }

    #[must_use]
    pub fn with_context_location(mut self, location: ContextLocation) -> Self {
        self.context_location = location;
        self
    }

    /// Resolution implied by the average spacing of `ticks`.
    ///
    /// Fewer than two ticks leave the spacing undefined, which reads as years.
    #[must_use]
    pub fn resolution_of(ticks: &[f64]) -> Resolution {
        let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
            return Resolution::Years;
        };
        let span = (last - first).abs() / 1_000.0;
        let interval = span / (ticks.len() as f64 - 1.0);
        resolution_for(interval, span)
    }

    /// Labels for `ticks`, one per tick in the same order.
    pub fn format_ticks(&self, ticks: &[f64]) -> TickResult<Vec<String>> {
        if ticks.is_empty() {
            return Ok(Vec::new());
        }
        self.format_ticks_at_resolution(ticks, Self::resolution_of(ticks))
    }

    /// Labels for `ticks` using `resolution` instead of the one implied by
    /// their spacing. Nested context formatters are driven through this.
    pub fn format_ticks_at_resolution(
        &self,
        ticks: &[f64],
        resolution: Resolution,
    ) -> TickResult<Vec<String>> {
        if let Some(bad) = ticks.iter().find(|tick| !tick.is_finite()) {
            return Err(TickError::InvalidTimestamp(*bad));
        }

        let mut labels = ticks
            .iter()
            .map(|tick| self.format_tick(*tick, resolution))
            .collect::<TickResult<Vec<_>>>()?;
        if self.hide_repeats {
            hide_repeated_labels(&mut labels);
        }
        trace!(%resolution, ticks = ticks.len(), "datetime tick labels");

        let Some(context) = &self.context else {
            return Ok(labels);
        };
        let context_labels = self.context_labels(context, ticks, resolution)?;
        Ok(self.attach_context(labels, &context_labels))
    }

    fn format_tick(&self, tick: f64, resolution: Resolution) -> TickResult<String> {
        let mut label = strftime(tick, self.formats.get(resolution))?;
        let mut final_resolution = resolution;

        if self.boundary_scaling {
            let tm = mktime(tick)?;
            (label, final_resolution) = self.scale_to_boundary(tick, &tm, resolution, label)?;
        }

        if self.strip_leading_zeros.applies_to(final_resolution) {
            label = strip_leading_zeros(&label);
        }
        Ok(label)
    }

    /// Walks to coarser resolutions while the tick sits on the boundary of
    /// the current one. Compound resolutions first fall back to their finer
    /// half when only the coarse field is zero (`00:55` reads as `:55`).
    fn scale_to_boundary(
        &self,
        tick: f64,
        tm: &Tm,
        resolution: Resolution,
        mut label: String,
    ) -> TickResult<(String, Resolution)> {
        let compound = matches!(resolution, Resolution::Minsec | Resolution::Hourmin);
        let mut compound_handled = false;
        let mut current = resolution;

        while tm[current.tm_index()] == 0 {
            let Some(next) = current.coarser() else {
                break;
            };
            if compound && !compound_handled {
                let finer_half = match resolution {
                    Resolution::Minsec => tm[4] == 0 && tm[5] != 0,
                    _ => tm[3] == 0 && tm[4] != 0,
                };
                if finer_half {
                    if let Some(finer) = resolution.finer() {
                        return Ok((strftime(tick, self.formats.get(finer))?, finer));
                    }
                    break;
                }
                compound_handled = true;
            }
            current = next;
            label = strftime(tick, self.formats.get(current))?;
        }

        Ok((label, current))
    }

    fn context_labels(
        &self,
        context: &DatetimeContext,
        ticks: &[f64],
        resolution: Resolution,
    ) -> TickResult<Vec<String>> {
        let mut labels = match context {
            DatetimeContext::Format(format) => ticks
                .iter()
                .map(|tick| strftime(*tick, format))
                .collect::<TickResult<Vec<_>>>()?,
            DatetimeContext::Formatter(formatter) => {
                formatter.format_ticks_at_resolution(ticks, resolution)?
            }
        };

        let keep = match self.context_which {
            ContextWhich::Start => Some(0),
            ContextWhich::Center => Some(labels.len() / 2),
            ContextWhich::End => labels.len().checked_sub(1),
            ContextWhich::All => None,
        };
        if let Some(keep) = keep {
            for (index, label) in labels.iter_mut().enumerate() {
                if index != keep {
                    label.clear();
                }
            }
        }
        Ok(labels)
    }

    fn attach_context(&self, labels: Vec<String>, context_labels: &[String]) -> Vec<String> {
        if context_labels.iter().all(String::is_empty) {
            return labels;
        }
        labels
            .into_iter()
            .zip(context_labels)
            .map(|(label, context)| match self.context_location {
                ContextLocation::Above => format!("{context}\n{label}"),
                ContextLocation::Below => format!("{label}\n{context}"),
                ContextLocation::Left if context.is_empty() => label,
                ContextLocation::Left => format!("{context} {label}"),
                ContextLocation::Right if context.is_empty() => label,
                ContextLocation::Right => format!("{label} {context}"),
            })
            .collect()
    }
}

/// Blanks every label equal to the last label left visible.
fn hide_repeated_labels(labels: &mut [String]) {
    let mut shown = 0;
    for index in 1..labels.len() {
        if labels[index] == labels[shown] {
            labels[index].clear();
        } else {
            shown = index;
        }
    }
}

fn strip_leading_zeros(label: &str) -> String {
    let stripped = label.trim_start_matches('0');
    if stripped.len() != label.len() && !starts_with_integer(stripped) {
        format!("0{stripped}")
    } else {
        stripped.to_owned()
    }
}

fn starts_with_integer(text: &str) -> bool {
    let text = text.trim_start();
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    text.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_keeps_a_single_zero_before_text() {
        assert_eq!(strip_leading_zeros("000ms"), "0ms");
        assert_eq!(strip_leading_zeros("005ms"), "5ms");
        assert_eq!(strip_leading_zeros("06/23"), "6/23");
        assert_eq!(strip_leading_zeros("12h"), "12h");
        assert_eq!(strip_leading_zeros("0"), "0");
    }

    #[test]
    fn repeats_compare_against_last_shown_label() {
        let mut labels: Vec<String> = ["a", "a", "b", "b", "a"].map(String::from).to_vec();
        hide_repeated_labels(&mut labels);
        assert_eq!(labels, ["a", "", "b", "", "a"]);
    }

    #[test]
    fn strip_leading_zeros_accepts_bool_or_list() {
        let all: StripLeadingZeros = serde_json::from_str("true").expect("bool");
        assert!(all.applies_to(Resolution::Days));
        let only: StripLeadingZeros = serde_json::from_str(r#"["hours"]"#).expect("list");
        assert!(only.applies_to(Resolution::Hours));
        assert!(!only.applies_to(Resolution::Days));
    }

    #[test]
    fn single_tick_uses_year_resolution() {
        assert_eq!(
            DatetimeTickFormatter::resolution_of(&[1_655_945_719_752.0]),
            Resolution::Years
        );
    }

    #[test]
    fn non_finite_ticks_are_rejected() {
        let err = DatetimeTickFormatter::new()
            .format_ticks(&[0.0, f64::NAN])
            .expect_err("nan tick");
        assert!(matches!(err, TickError::InvalidTimestamp(_)));
    }
}

//! strftime-style rendering of millisecond timestamps.
//!
//! GNU conversion directives are rendered by chrono. Two sub-second
//! extensions are handled here: `%f` (6-digit microseconds, derived from the
//! fractional millisecond) and `%N` / `%<width>N` (nanoseconds, of which only
//! the millisecond part is significant).

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::core::calendar::datetime_from_millis;
use crate::error::{TickError, TickResult};

/// Conversion characters forwarded to chrono.
const CHRONO_DIRECTIVES: &str = "aAbBcCdDeFgGhHIjklmMnpPrRsStTuUVwWxXyYzZ";
const PADDING_FLAGS: &str = "-_0";
const NANOS_DIGITS: usize = 9;

/// Broken-down UTC time: `[year, month (1-based), day, hour, minute, second]`.
pub type Tm = [i32; 6];

pub fn mktime(millis: f64) -> TickResult<Tm> {
    let date = datetime(millis)?;
    Ok(broken_down(&date))
}

/// Microsecond-of-second for a millisecond timestamp, rounded half up.
///
/// The result is always in `0..1_000_000`. Pre-epoch timestamps count
/// forwards from the start of their second, and a fraction that rounds up
/// to a whole second wraps to `0`, so `%f` is always six digits.
#[must_use]
pub fn microseconds_of(millis: f64) -> i64 {
    let fraction = (millis / 1_000.0) % 1.0;
    let micros = (fraction * 1.0e6 + 0.5).floor() as i64;
    micros.rem_euclid(1_000_000)
}

/// Renders `millis` with a strftime-style `format`.
///
/// Unrecognised `%` sequences are copied through unchanged.
pub fn strftime(millis: f64, format: &str) -> TickResult<String> {
    if !format.contains('%') {
        return Ok(format.to_owned());
    }
    let date = datetime(millis)?;

    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    while let Some(position) = rest.find('%') {
        out.push_str(&rest[..position]);
        let directive = &rest[position + 1..];
        let consumed = render_directive(directive, millis, &date, &mut out)?;
        rest = &directive[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Renders the directive at the start of `directive` (the text after `%`)
/// and returns how many bytes it consumed.
fn render_directive(
    directive: &str,
    millis: f64,
    date: &DateTime<Utc>,
    out: &mut String,
) -> TickResult<usize> {
    let mut chars = directive.chars();
    let Some(first) = chars.next() else {
        out.push('%');
        return Ok(0);
    };

    match first {
        '%' => {
            out.push('%');
            Ok(1)
        }
        'f' => {
            write!(out, "{:06}", microseconds_of(millis))
                .map_err(|_| TickError::InvalidTimestamp(millis))?;
            Ok(1)
        }
        'N' => {
            push_nanos(date, NANOS_DIGITS, out);
            Ok(1)
        }
        '0'..='9' => {
            let digits = directive
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(directive.len());
            if directive[digits..].starts_with('N') {
                let width = directive[..digits].parse().unwrap_or(NANOS_DIGITS);
                push_nanos(date, width, out);
                return Ok(digits + 1);
            }
            if first == '0' && chars.next().is_some_and(is_chrono_directive) {
                return push_chrono(&directive[..2], millis, date, out);
            }
            out.push('%');
            Ok(0)
        }
        flag if PADDING_FLAGS.contains(flag) => {
            if chars.next().is_some_and(is_chrono_directive) {
                push_chrono(&directive[..2], millis, date, out)
            } else {
                out.push('%');
                Ok(0)
            }
        }
        conversion if is_chrono_directive(conversion) => {
            push_chrono(&directive[..conversion.len_utf8()], millis, date, out)
        }
        _ => {
            out.push('%');
            Ok(0)
        }
    }
}

fn is_chrono_directive(c: char) -> bool {
    CHRONO_DIRECTIVES.contains(c)
}

fn push_chrono(spec: &str, millis: f64, date: &DateTime<Utc>, out: &mut String) -> TickResult<usize> {
    let pattern = format!("%{spec}");
    // chrono reports unsupported flag/directive pairs as a fmt::Error.
    write!(out, "{}", date.format(&pattern)).map_err(|_| TickError::InvalidTimestamp(millis))?;
    Ok(spec.len())
}

fn push_nanos(date: &DateTime<Utc>, width: usize, out: &mut String) {
    let nanos = format!("{:09}", date.timestamp_subsec_millis() * 1_000_000);
    out.push_str(&nanos[..width.min(NANOS_DIGITS)]);
}

fn datetime(millis: f64) -> TickResult<DateTime<Utc>> {
    datetime_from_millis(millis).ok_or(TickError::InvalidTimestamp(millis))
}

fn broken_down(date: &DateTime<Utc>) -> Tm {
    [
        date.year(),
        date.month() as i32,
        date.day() as i32,
        date.hour() as i32,
        date.minute() as i32,
        date.second() as i32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 1_655_945_719_752.0;

    #[test]
    fn microseconds_wrap_before_epoch() {
        assert_eq!(microseconds_of(123_456_789.1234), 789_123);
        assert_eq!(microseconds_of(-123_456_789.1234), 210_877);
        assert_eq!(microseconds_of(T), 752_000);
    }

    #[test]
    fn microseconds_rounding_up_to_a_whole_second_wrap_to_zero() {
        assert_eq!(microseconds_of(999.9999996), 0);
        assert_eq!(microseconds_of(999.9994), 999_999);
        assert_eq!(microseconds_of(-0.0000004), 0);

        let label = strftime(999.9999996, "%fus").expect("format");
        assert_eq!(label, "000000us");
    }

    #[test]
    fn mktime_breaks_down_utc_fields() {
        assert_eq!(mktime(T).expect("valid"), [2022, 6, 23, 0, 55, 19]);
        assert!(mktime(f64::NAN).is_err());
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strftime(T, "foo").expect("format"), "foo");
        assert_eq!(strftime(T, "").expect("format"), "");
    }

    #[test]
    fn gnu_directives_go_through_chrono() {
        assert_eq!(
            strftime(T, "%Y %m %d %H %M %S").expect("format"),
            "2022 06 23 00 55 19"
        );
        assert_eq!(strftime(T, "%-m/%-d").expect("format"), "6/23");
        assert_eq!(strftime(T, "%F %T").expect("format"), "2022-06-23 00:55:19");
    }

    #[test]
    fn sub_second_directives() {
        assert_eq!(strftime(T, "%fus").expect("format"), "752000us");
        assert_eq!(strftime(T, "%3Nms").expect("format"), "752ms");
        assert_eq!(strftime(T, "%N").expect("format"), "752000000");
    }

    #[test]
    fn unknown_and_escaped_percent_are_literal() {
        assert_eq!(strftime(T, "100%%").expect("format"), "100%");
        assert_eq!(strftime(T, "%Q%Y").expect("format"), "%Q2022");
        assert_eq!(strftime(T, "end%").expect("format"), "end%");
    }
}

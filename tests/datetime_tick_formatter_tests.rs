use chart_ticks::api::{
    ContextLocation, ContextWhich, DatetimeTickFormatter, Resolution, ResolutionFormats,
};

// 2022-06-23T00:55:19.752Z
const T: f64 = 1_655_945_719_752.0;
// 2022-06-23T00:00:00Z
const MIDNIGHT: f64 = 1_655_942_400_000.0;

const MINUTE: f64 = 60_000.0;
const HOUR: f64 = 3_600_000.0;
const DAY: f64 = 86_400_000.0;

fn hour_ticks() -> [f64; 3] {
    [MIDNIGHT, MIDNIGHT + HOUR, MIDNIGHT + 2.0 * HOUR]
}

fn labels(formatter: &DatetimeTickFormatter, ticks: &[f64]) -> Vec<String> {
    formatter.format_ticks(ticks).expect("format ticks")
}

fn named_formats() -> ResolutionFormats {
    ResolutionFormats::from_fn(|resolution| match resolution {
        Resolution::Seconds => "s".to_owned(),
        other => other.as_str().to_owned(),
    })
}

#[test]
fn default_formats_per_resolution() {
    let formatter = DatetimeTickFormatter::default();

    assert_eq!(
        labels(&formatter, &[T, T + 0.001, T + 0.002]),
        ["752000us", "752001us", "752002us"]
    );
    assert_eq!(labels(&formatter, &[T, T + 1.0, T + 2.0]), ["752ms", "753ms", "754ms"]);
    assert_eq!(
        labels(&formatter, &[T, T + 1_000.0, T + 2_000.0]),
        ["19s", "20s", "21s"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + 50_000.0, T + 100_000.0]),
        [":55:19", ":56:09", ":56:59"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + MINUTE, T + 2.0 * MINUTE]),
        [":55", ":56", ":57"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + 30.0 * MINUTE, T + 60.0 * MINUTE]),
        [":55", "01:25", "01:55"]
    );
    assert_eq!(labels(&formatter, &hour_ticks()), ["06/23", "01h", "02h"]);
    assert_eq!(
        labels(&formatter, &[T, T + DAY, T + 2.0 * DAY]),
        ["06/23", "06/24", "06/25"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + 30.0 * DAY, T + 60.0 * DAY]),
        ["06/2022", "07/2022", "08/2022"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + 365.0 * DAY, T + 730.0 * DAY]),
        ["2022", "2023", "2024"]
    );
}

#[test]
fn hour_ticks_off_the_hour_still_show_the_date_first() {
    let formatter = DatetimeTickFormatter::default();
    let ticks = [T, T + HOUR, T + 2.0 * HOUR];
    assert_eq!(labels(&formatter, &ticks), ["06/23", "01h", "02h"]);

    let stripped = formatter.with_strip_leading_zeros(true);
    assert_eq!(labels(&stripped, &ticks), ["6/23", "1h", "2h"]);
}

#[test]
fn empty_tick_list_yields_no_labels() {
    assert!(labels(&DatetimeTickFormatter::default(), &[]).is_empty());
}

#[test]
fn strip_leading_zeros_everywhere_or_per_resolution() {
    let ticks = hour_ticks();

    let all = DatetimeTickFormatter::default().with_strip_leading_zeros(true);
    assert_eq!(labels(&all, &ticks), ["6/23", "1h", "2h"]);

    let hours_only = DatetimeTickFormatter::default().with_strip_leading_zeros(vec![Resolution::Hours]);
    assert_eq!(labels(&hours_only, &ticks), ["06/23", "1h", "2h"]);

    let days_only = DatetimeTickFormatter::default().with_strip_leading_zeros(vec![Resolution::Days]);
    assert_eq!(labels(&days_only, &ticks), ["6/23", "01h", "02h"]);
}

#[test]
fn strip_leading_zeros_keeps_a_lone_zero() {
    let formatter =
        DatetimeTickFormatter::default().with_strip_leading_zeros(vec![Resolution::Milliseconds]);
    let ticks = [T - 752.0, T - 747.0, T - 742.0];
    assert_eq!(labels(&formatter, &ticks), ["0ms", "5ms", "10ms"]);
}

#[test]
fn boundary_scaling_can_be_disabled() {
    let formatter = DatetimeTickFormatter::default().with_boundary_scaling(false);
    assert_eq!(labels(&formatter, &hour_ticks()), ["00h", "01h", "02h"]);
}

#[test]
fn hide_repeats_blanks_duplicates() {
    let formatter = DatetimeTickFormatter::default()
        .with_format(Resolution::Hours, "%m/%d")
        .with_hide_repeats(true);
    let ticks = [MIDNIGHT + HOUR, MIDNIGHT + 2.0 * HOUR, MIDNIGHT + 3.0 * HOUR];
    assert_eq!(labels(&formatter, &ticks), ["06/23", "", ""]);
}

#[test]
fn plain_string_context() {
    let formatter = DatetimeTickFormatter::default().with_context("FOO");
    assert_eq!(
        labels(&formatter, &hour_ticks()),
        ["06/23\nFOO", "01h\n", "02h\n"]
    );
}

#[test]
fn context_which_selects_ticks() {
    let base = DatetimeTickFormatter::default().with_context("%Y");
    let ticks = hour_ticks();

    assert_eq!(
        labels(&base, &ticks),
        ["06/23\n2022", "01h\n", "02h\n"]
    );
    assert_eq!(
        labels(&base.clone().with_context_which(ContextWhich::End), &ticks),
        ["06/23\n", "01h\n", "02h\n2022"]
    );
    assert_eq!(
        labels(&base.clone().with_context_which(ContextWhich::Center), &ticks),
        ["06/23\n", "01h\n2022", "02h\n"]
    );
    assert_eq!(
        labels(&base.with_context_which(ContextWhich::All), &ticks),
        ["06/23\n2022", "01h\n2022", "02h\n2022"]
    );
}

#[test]
fn context_location_controls_joining() {
    let base = DatetimeTickFormatter::default().with_context("%Y");
    let ticks = hour_ticks();

    assert_eq!(
        labels(&base.clone().with_context_location(ContextLocation::Left), &ticks),
        ["2022 06/23", "01h", "02h"]
    );
    assert_eq!(
        labels(&base.clone().with_context_location(ContextLocation::Right), &ticks),
        ["06/23 2022", "01h", "02h"]
    );
    assert_eq!(
        labels(&base.with_context_location(ContextLocation::Above), &ticks),
        ["2022\n06/23", "\n01h", "\n02h"]
    );
}

#[test]
fn all_empty_context_leaves_labels_untouched() {
    let formatter = DatetimeTickFormatter::default().with_context("");
    assert_eq!(labels(&formatter, &hour_ticks()), ["06/23", "01h", "02h"]);
}

#[test]
fn nested_formatter_context_uses_parent_resolution() {
    let context = DatetimeTickFormatter::default().with_formats(named_formats());
    let formatter = DatetimeTickFormatter::default().with_context(context);

    assert_eq!(
        labels(&formatter, &[T, T + 0.001, T + 0.002]),
        ["752000us\nmicroseconds", "752001us\n", "752002us\n"]
    );
    assert_eq!(
        labels(&formatter, &hour_ticks()),
        ["06/23\ndays", "01h\n", "02h\n"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + 365.0 * DAY, T + 730.0 * DAY]),
        ["2022\nyears", "2023\n", "2024\n"]
    );
}

#[test]
fn nested_context_hides_its_own_repeats() {
    let context = DatetimeTickFormatter::default()
        .with_formats(named_formats())
        .with_hide_repeats(true);
    let formatter = DatetimeTickFormatter::default()
        .with_context(context)
        .with_context_which(ContextWhich::All);

    assert_eq!(
        labels(&formatter, &[T, T + 365.0 * DAY, T + 730.0 * DAY]),
        ["2022\nyears", "2023\n", "2024\n"]
    );
}

#[test]
fn relative_context_shows_the_enclosing_unit() {
    let formatter =
        DatetimeTickFormatter::default().with_context(DatetimeTickFormatter::relative_context());

    assert_eq!(
        labels(&formatter, &[T, T + 1_000.0, T + 2_000.0]),
        ["19s\n00:55", "20s\n", "21s\n"]
    );
    assert_eq!(
        labels(&formatter, &[T, T + DAY, T + 2.0 * DAY]),
        ["06/23\n2022", "06/24\n", "06/25\n"]
    );
    // Month ticks have no context text at all.
    assert_eq!(
        labels(&formatter, &[T, T + 30.0 * DAY, T + 60.0 * DAY]),
        ["06/2022", "07/2022", "08/2022"]
    );
}

#[test]
fn formatter_deserializes_with_defaults() {
    let formatter: DatetimeTickFormatter = serde_json::from_str(
        r#"{
            "hours": "%H:00",
            "strip_leading_zeros": ["hours"],
            "context": "%Y",
            "context_which": "end",
            "context_location": "right"
        }"#,
    )
    .expect("parse formatter");

    assert_eq!(formatter.formats.hours, "%H:00");
    assert_eq!(formatter.formats.days, "%m/%d");
    assert!(formatter.boundary_scaling);
    assert!(!formatter.hide_repeats);
    assert_eq!(formatter.context_which, ContextWhich::End);
    assert_eq!(
        labels(&formatter, &hour_ticks()),
        ["06/23", "1:00", "2:00 2022"]
    );
}

#[test]
fn nested_context_deserializes_from_object() {
    let formatter: DatetimeTickFormatter =
        serde_json::from_str(r#"{"context": {"hours": "%F", "boundary_scaling": false}}"#).expect("parse");
    assert_eq!(
        labels(&formatter, &hour_ticks()),
        ["06/23\n2022-06-23", "01h\n", "02h\n"]
    );
}

mod axis;
mod datetime_formatter;
mod json_contract;
mod resolution;
mod strftime;

pub use axis::{
    AXIS_TIME_TARGET_SPACING_PX, AxisTick, AxisTickLayout, DatetimeAxis, DatetimeAxisConfig,
    tick_count_for_span,
};
pub use datetime_formatter::{
    ContextLocation, ContextWhich, DatetimeContext, DatetimeTickFormatter, ResolutionFormats,
    StripLeadingZeros,
};
pub use json_contract::{AXIS_CONFIG_JSON_SCHEMA_V1, DatetimeAxisConfigJsonContractV1};
pub use resolution::{Resolution, resolution_for};
pub use strftime::{Tm, microseconds_of, mktime, strftime};

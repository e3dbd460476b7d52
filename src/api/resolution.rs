use serde::{Deserialize, Serialize};

use crate::core::calendar::{
    ONE_DAY, ONE_HOUR, ONE_MILLI, ONE_MINUTE, ONE_MONTH, ONE_SECOND, ONE_YEAR,
};

/// Intervals are padded by this factor before classification so that a tick
/// spacing just under a unit boundary still reads at the coarser unit.
const INTERVAL_SLACK: f64 = 1.1;

/// Label granularity for a set of datetime ticks, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Microseconds,
    Milliseconds,
    Seconds,
    Minsec,
    Minutes,
    Hourmin,
    Hours,
    Days,
    Months,
    Years,
}

impl Resolution {
    pub const ORDER: [Resolution; 10] = [
        Resolution::Microseconds,
        Resolution::Milliseconds,
        Resolution::Seconds,
        Resolution::Minsec,
        Resolution::Minutes,
        Resolution::Hourmin,
        Resolution::Hours,
        Resolution::Days,
        Resolution::Months,
        Resolution::Years,
    ];

    /// Position in [`Resolution::ORDER`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next coarser resolution, `None` for years.
    #[must_use]
    pub fn coarser(self) -> Option<Resolution> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    /// Next finer resolution, `None` for microseconds.
    #[must_use]
    pub fn finer(self) -> Option<Resolution> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ORDER.get(index).copied())
    }

    /// Field of the `[year, month, day, hour, minute, second]` tuple that a
    /// label at this resolution rolls over on.
    ///
    /// Sub-second, day, month and year labels all key on the year field, so
    /// boundary scaling never promotes them.
    #[must_use]
    pub fn tm_index(self) -> usize {
        match self {
            Resolution::Microseconds
            | Resolution::Milliseconds
            | Resolution::Days
            | Resolution::Months
            | Resolution::Years => 0,
            Resolution::Seconds => 5,
            Resolution::Minsec | Resolution::Minutes => 4,
            Resolution::Hourmin | Resolution::Hours => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Microseconds => "microseconds",
            Resolution::Milliseconds => "milliseconds",
            Resolution::Seconds => "seconds",
            Resolution::Minsec => "minsec",
            Resolution::Minutes => "minutes",
            Resolution::Hourmin => "hourmin",
            Resolution::Hours => "hours",
            Resolution::Days => "days",
            Resolution::Months => "months",
            Resolution::Years => "years",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a tick spacing into a label resolution.
///
/// Both arguments are in seconds: `interval_secs` is the spacing between
/// neighbouring ticks and `span_secs` is the distance from the first tick to
/// the last. The span only matters for the compound minute/second and
/// hour/minute resolutions. A NaN interval classifies as years.
#[must_use]
pub fn resolution_for(interval_secs: f64, span_secs: f64) -> Resolution {
    let interval = interval_secs * INTERVAL_SLACK * 1_000.0;
    let span = span_secs * 1_000.0;

    if interval < ONE_MILLI {
        Resolution::Microseconds
    } else if interval < ONE_SECOND {
        Resolution::Milliseconds
    } else if interval < ONE_MINUTE {
        if span >= ONE_MINUTE {
            Resolution::Minsec
        } else {
            Resolution::Seconds
        }
    } else if interval < ONE_HOUR {
        if span >= ONE_HOUR {
            Resolution::Hourmin
        } else {
            Resolution::Minutes
        }
    } else if interval < ONE_DAY {
        Resolution::Hours
    } else if interval < ONE_MONTH {
        Resolution::Days
    } else if interval < ONE_YEAR {
        Resolution::Months
    } else {
        Resolution::Years
    }
}

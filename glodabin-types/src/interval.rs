//! Calendar granularities used for rounding and binning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GlodaError;

/// A named calendar granularity, ordered from finest to coarsest.
///
/// `Quarters` is declared for completeness but no operation supports it yet;
/// rounding, enumeration, and binning reject it with
/// [`GlodaError::InvalidInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    /// One millisecond.
    Milliseconds,
    /// One second.
    Seconds,
    /// One minute.
    Minutes,
    /// One hour of local wall time.
    Hours,
    /// One local calendar day.
    Days,
    /// One local calendar week, starting on the configured week start day.
    Weeks,
    /// One local calendar month.
    Months,
    /// Three calendar months. Reserved.
    Quarters,
    /// One local calendar year.
    Years,
}

impl Interval {
    /// All intervals, finest first.
    pub const ALL: [Self; 9] = [
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Quarters,
        Self::Years,
    ];

    /// Intervals every operation accepts.
    pub const SUPPORTED: [Self; 8] = [
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Stable lowercase name, also used by `Display` and serde.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Quarters => "quarters",
            Self::Years => "years",
        }
    }

    /// Fixed length in milliseconds for intervals truncated by duration
    /// (hours and finer). `None` for calendar intervals.
    #[must_use]
    pub const fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Milliseconds => Some(1),
            Self::Seconds => Some(1_000),
            Self::Minutes => Some(60_000),
            Self::Hours => Some(3_600_000),
            _ => None,
        }
    }

    /// True for intervals whose boundaries are computed from local calendar
    /// fields (days and coarser).
    #[must_use]
    pub const fn is_calendar(self) -> bool {
        matches!(
            self,
            Self::Days | Self::Weeks | Self::Months | Self::Quarters | Self::Years
        )
    }

    /// Returns the interval unchanged if it is supported, `InvalidInterval` otherwise.
    ///
    /// # Errors
    /// Returns `Err(GlodaError::InvalidInterval)` for `Quarters`.
    pub fn supported(self) -> Result<Self, GlodaError> {
        match self {
            Self::Quarters => Err(GlodaError::invalid_interval(self.as_str())),
            other => Ok(other),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = GlodaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let iv = match token.as_str() {
            "ms" | "millisecond" | "milliseconds" => Self::Milliseconds,
            "s" | "sec" | "second" | "seconds" => Self::Seconds,
            "min" | "minute" | "minutes" => Self::Minutes,
            "h" | "hour" | "hours" => Self::Hours,
            "d" | "day" | "days" => Self::Days,
            "w" | "week" | "weeks" => Self::Weeks,
            "mo" | "month" | "months" => Self::Months,
            "q" | "quarter" | "quarters" => Self::Quarters,
            "y" | "year" | "years" => Self::Years,
            _ => return Err(GlodaError::invalid_interval(s)),
        };
        Ok(iv)
    }
}

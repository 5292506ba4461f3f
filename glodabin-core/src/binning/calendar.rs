use chrono::offset::{LocalResult, Offset};
use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::{BinningConfig, GlodaError, Interval};

const DAY_MS: i64 = 86_400_000;
// Mean Gregorian year (365.2425 days).
const YEAR_MS: i64 = 31_556_952_000;
// Longest run of nonexistent local time we will walk across (Pacific/Apia skipped a day).
const MAX_GAP_MINUTES: i64 = 48 * 60;
// Offset changes crossed while looking for one fixed-unit boundary.
const MAX_OFFSET_HOPS: usize = 8;

/// Approximate length of one interval unit in milliseconds.
///
/// Exact for hours and finer. Days and weeks assume 24-hour days, years use the
/// mean Gregorian year, and months return `0`: month stepping must use calendar
/// fields, never millisecond arithmetic.
///
/// # Errors
/// Returns `Err(GlodaError::InvalidInterval)` for `Quarters`.
///
/// ```
/// use glodabin_core::{Interval, nominal_step_millis};
/// assert_eq!(nominal_step_millis(Interval::Hours).unwrap(), 3_600_000);
/// assert_eq!(nominal_step_millis(Interval::Months).unwrap(), 0);
/// assert!(nominal_step_millis(Interval::Quarters).is_err());
/// ```
pub fn nominal_step_millis(interval: Interval) -> Result<i64, GlodaError> {
    match interval.supported()? {
        Interval::Days => Ok(DAY_MS),
        Interval::Weeks => Ok(7 * DAY_MS),
        Interval::Months => Ok(0),
        Interval::Years => Ok(YEAR_MS),
        fixed => fixed
            .fixed_millis()
            .ok_or_else(|| GlodaError::invalid_interval(fixed.as_str())),
    }
}

fn out_of_range(what: impl std::fmt::Display) -> GlodaError {
    GlodaError::TimeOutOfRange(what.to_string())
}

fn fixed_unit(interval: Interval) -> Result<i64, GlodaError> {
    interval
        .fixed_millis()
        .ok_or_else(|| GlodaError::invalid_interval(interval.as_str()))
}

// t - ((t + offset) mod unit), in milliseconds.
fn align_down(t: DateTime<Utc>, offset_ms: i64, unit: i64) -> Result<DateTime<Utc>, GlodaError> {
    let ms = t.timestamp_millis();
    let bucket = ms - (ms + offset_ms).rem_euclid(unit);
    DateTime::from_timestamp_millis(bucket).ok_or_else(|| out_of_range(bucket))
}

fn is_aligned(t: DateTime<Utc>, offset_ms: i64, unit: i64) -> bool {
    (t.timestamp_millis() + offset_ms).rem_euclid(unit) == 0
}

/// Rounds instants to interval boundaries in a local time zone.
///
/// Hours and finer start where the local time, read with that instant's own
/// UTC offset, is a whole number of units. Both passes through a repeated
/// wall-clock hour therefore keep distinct buckets, and a shift that is not a
/// whole unit (Lord Howe's half hour) merges the straddling hours into one
/// longer bucket. Days and coarser start at local midnight of the first day of the
/// period. A local midnight swallowed by a DST gap resolves to the first valid
/// instant after the gap; an ambiguous one resolves to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    tz: Tz,
    week_start: Weekday,
    max_boundaries: usize,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::from_config(&BinningConfig::default())
    }
}

impl Calendar {
    /// Calendar for `tz` with weeks starting on `week_start`.
    #[must_use]
    pub const fn new(tz: Tz, week_start: Weekday) -> Self {
        Self {
            tz,
            week_start,
            max_boundaries: BinningConfig::DEFAULT_MAX_BOUNDARIES,
        }
    }

    /// Calendar matching a `BinningConfig`.
    #[must_use]
    pub const fn from_config(cfg: &BinningConfig) -> Self {
        Self {
            tz: cfg.timezone,
            week_start: cfg.week_start,
            max_boundaries: cfg.max_boundaries,
        }
    }

    /// Override the cap on boundaries a single enumeration may produce.
    #[must_use]
    pub const fn with_max_boundaries(mut self, max: usize) -> Self {
        self.max_boundaries = max;
        self
    }

    /// Zone in which calendar fields are read.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// First day of week buckets.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Boundary cap used by enumeration.
    #[must_use]
    pub const fn max_boundaries(&self) -> usize {
        self.max_boundaries
    }

    /// Start of the interval enclosing `t`.
    ///
    /// Idempotent: rounding a boundary returns it unchanged.
    ///
    /// # Errors
    /// - `InvalidInterval` for `Quarters`.
    /// - `TimeOutOfRange` near the limits of `DateTime<Utc>`.
    pub fn round_down(
        &self,
        t: DateTime<Utc>,
        interval: Interval,
    ) -> Result<DateTime<Utc>, GlodaError> {
        let interval = interval.supported()?;
        if !interval.is_calendar() {
            return self.floor_fixed(t, fixed_unit(interval)?);
        }
        let date = t.with_timezone(&self.tz).date_naive();
        let start = self.period_start(date, interval)?;
        self.local_midnight(start)
    }

    /// Start of the interval following the one enclosing `t`.
    ///
    /// A `t` that already sits on a boundary rounds up to the next boundary, so
    /// `round_down(t) <= t < round_up(t)` always holds.
    ///
    /// # Errors
    /// - `InvalidInterval` for `Quarters`.
    /// - `TimeOutOfRange` near the limits of `DateTime<Utc>`.
    pub fn round_up(
        &self,
        t: DateTime<Utc>,
        interval: Interval,
    ) -> Result<DateTime<Utc>, GlodaError> {
        let interval = interval.supported()?;
        if !interval.is_calendar() {
            return self.ceil_fixed(t, fixed_unit(interval)?);
        }
        let date = t.with_timezone(&self.tz).date_naive();
        let start = self.period_start(date, interval)?;
        let next = Self::next_period_start(start, interval)?;
        self.local_midnight(next)
    }

    // Latest boundary at or before `t`. A boundary is an instant whose own
    // local time is a multiple of `unit`.
    fn floor_fixed(&self, t: DateTime<Utc>, unit: i64) -> Result<DateTime<Utc>, GlodaError> {
        let mut cur = t;
        for _ in 0..MAX_OFFSET_HOPS {
            let offset = self.offset_ms(cur);
            let aligned = align_down(cur, offset, unit)?;
            if self.offset_ms(aligned) == offset {
                return Ok(aligned);
            }
            // The offset changed inside (aligned, cur]; under the new offset only the
            // change itself can be a boundary.
            let change = self.offset_change(aligned, cur);
            if is_aligned(change, offset, unit) {
                return Ok(change);
            }
            cur = change - TimeDelta::milliseconds(1);
        }
        Err(out_of_range(format!("no {unit}ms boundary near {t} in {}", self.tz)))
    }

    // Earliest boundary strictly after `t`.
    fn ceil_fixed(&self, t: DateTime<Utc>, unit: i64) -> Result<DateTime<Utc>, GlodaError> {
        let step = TimeDelta::try_milliseconds(unit).ok_or_else(|| out_of_range(unit))?;
        let mut cur = t;
        for _ in 0..MAX_OFFSET_HOPS {
            let offset = self.offset_ms(cur);
            let next = align_down(cur, offset, unit)?
                .checked_add_signed(step)
                .ok_or_else(|| out_of_range(cur))?;
            if self.offset_ms(next) == offset {
                return Ok(next);
            }
            let change = self.offset_change(cur, next);
            if is_aligned(change, self.offset_ms(change), unit) {
                return Ok(change);
            }
            cur = change;
        }
        Err(out_of_range(format!("no {unit}ms boundary after {t} in {}", self.tz)))
    }

    fn offset_ms(&self, t: DateTime<Utc>) -> i64 {
        i64::from(t.with_timezone(&self.tz).offset().fix().local_minus_utc()) * 1000
    }

    // First instant in (lo, hi] carrying the offset in force at `hi`.
    fn offset_change(&self, lo: DateTime<Utc>, hi: DateTime<Utc>) -> DateTime<Utc> {
        let target = self.offset_ms(hi);
        let (mut lo, mut hi) = (lo, hi);
        while hi - lo > TimeDelta::milliseconds(1) {
            let mid = lo + (hi - lo) / 2;
            if self.offset_ms(mid) == target {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }

    fn period_start(&self, date: NaiveDate, interval: Interval) -> Result<NaiveDate, GlodaError> {
        let start = match interval {
            Interval::Days => Some(date),
            Interval::Weeks => {
                let back = (date.weekday().num_days_from_sunday() + 7
                    - self.week_start.num_days_from_sunday())
                    % 7;
                date.checked_sub_days(Days::new(u64::from(back)))
            }
            Interval::Months => date.with_day(1),
            Interval::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1),
            other => return Err(GlodaError::invalid_interval(other.as_str())),
        };
        start.ok_or_else(|| out_of_range(date))
    }

    pub(crate) fn next_period_start(
        start: NaiveDate,
        interval: Interval,
    ) -> Result<NaiveDate, GlodaError> {
        let next = match interval {
            Interval::Days => start.checked_add_days(Days::new(1)),
            Interval::Weeks => start.checked_add_days(Days::new(7)),
            Interval::Months => start.checked_add_months(Months::new(1)),
            Interval::Years => start.checked_add_months(Months::new(12)),
            other => return Err(GlodaError::invalid_interval(other.as_str())),
        };
        next.ok_or_else(|| out_of_range(start))
    }

    /// Local date of `t` snapped to the start of its calendar period.
    pub(crate) fn local_period_start(
        &self,
        t: DateTime<Utc>,
        interval: Interval,
    ) -> Result<NaiveDate, GlodaError> {
        self.period_start(t.with_timezone(&self.tz).date_naive(), interval)
    }

    /// First instant of local `date`.
    pub(crate) fn local_midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>, GlodaError> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| out_of_range(date))?;
        if let Some(dt) = self.resolve_local(midnight) {
            return Ok(dt);
        }
        // Walk forward out of a DST gap.
        let mut candidate = midnight;
        for _ in 0..MAX_GAP_MINUTES {
            candidate = candidate
                .checked_add_signed(TimeDelta::minutes(1))
                .ok_or_else(|| out_of_range(date))?;
            if let Some(dt) = self.resolve_local(candidate) {
                return Ok(dt);
            }
        }
        Err(out_of_range(format!("no valid local time on {date} in {}", self.tz)))
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }
}

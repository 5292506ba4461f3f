use chrono::{DateTime, TimeDelta, Utc};

use super::calendar::{Calendar, nominal_step_millis};
use crate::{GlodaError, Interval};

/// Enumerate interval boundaries covering `[min, max]` in UTC with Sunday weeks.
///
/// See [`Calendar::enumerate_boundaries`].
///
/// # Errors
/// Same as [`Calendar::enumerate_boundaries`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use glodabin_core::{Interval, enumerate_boundaries};
///
/// let min = Utc.with_ymd_and_hms(2021, 1, 15, 0, 0, 0).unwrap();
/// let max = Utc.with_ymd_and_hms(2021, 2, 3, 0, 0, 0).unwrap();
/// let b = enumerate_boundaries(min, max, Interval::Months).unwrap();
/// assert_eq!(b, vec![
///     Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap(),
/// ]);
/// ```
pub fn enumerate_boundaries(
    min: DateTime<Utc>,
    max: DateTime<Utc>,
    interval: Interval,
) -> Result<Vec<DateTime<Utc>>, GlodaError> {
    Calendar::default().enumerate_boundaries(min, max, interval)
}

impl Calendar {
    /// Ascending interval boundaries from `round_down(min)` through
    /// `round_down(round_up(max))`, both inclusive.
    ///
    /// - Days and weeks advance by 1.5 nominal steps and round down again, so a
    ///   23- or 25-hour day can never send a step back into the bucket it left.
    /// - Hours and finer advance with [`Calendar::round_up`]. An offset shift
    ///   that is not a whole unit makes buckets longer than one unit, which a
    ///   fixed over-step could fail to leave.
    /// - Months and years advance by calendar fields.
    /// - `min > max` yields an empty list.
    ///
    /// # Errors
    /// - `InvalidInterval` for `Quarters`.
    /// - `IntervalEnumeration` if more than `max_boundaries` boundaries would be
    ///   produced, or if a step fails to advance.
    /// - `TimeOutOfRange` near the limits of `DateTime<Utc>`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "glodabin_core::boundaries::enumerate",
            skip(self),
            fields(cap = self.max_boundaries()),
        )
    )]
    pub fn enumerate_boundaries(
        &self,
        min: DateTime<Utc>,
        max: DateTime<Utc>,
        interval: Interval,
    ) -> Result<Vec<DateTime<Utc>>, GlodaError> {
        let interval = interval.supported()?;
        let mut out = Vec::new();
        if min > max {
            return Ok(out);
        }
        let limit = self.round_down(self.round_up(max, interval)?, interval)?;

        match interval {
            Interval::Months | Interval::Years => {
                let mut date = self.local_period_start(min, interval)?;
                loop {
                    let d = self.local_midnight(date)?;
                    if d > limit {
                        break;
                    }
                    self.push_bounded(&mut out, d, interval)?;
                    date = Self::next_period_start(date, interval)?;
                }
            }
            Interval::Days | Interval::Weeks => {
                let step = TimeDelta::try_milliseconds(nominal_step_millis(interval)? * 3 / 2)
                    .ok_or_else(|| GlodaError::TimeOutOfRange(interval.to_string()))?;
                let mut d = self.round_down(min, interval)?;
                while d <= limit {
                    self.push_bounded(&mut out, d, interval)?;
                    let stepped = d
                        .checked_add_signed(step)
                        .ok_or_else(|| GlodaError::TimeOutOfRange(d.to_string()))?;
                    let next = self.round_down(stepped, interval)?;
                    if next <= d {
                        return Err(self.enumeration_error(interval));
                    }
                    d = next;
                }
            }
            _ => {
                let mut d = self.round_down(min, interval)?;
                while d <= limit {
                    self.push_bounded(&mut out, d, interval)?;
                    let next = self.round_up(d, interval)?;
                    if next <= d {
                        return Err(self.enumeration_error(interval));
                    }
                    d = next;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(count = out.len(), "enumerated boundaries");
        Ok(out)
    }

    fn push_bounded(
        &self,
        out: &mut Vec<DateTime<Utc>>,
        d: DateTime<Utc>,
        interval: Interval,
    ) -> Result<(), GlodaError> {
        if out.len() >= self.max_boundaries() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%interval, cap = self.max_boundaries(), "boundary cap exceeded");
            return Err(self.enumeration_error(interval));
        }
        out.push(d);
        Ok(())
    }

    fn enumeration_error(&self, interval: Interval) -> GlodaError {
        GlodaError::IntervalEnumeration {
            limit: self.max_boundaries(),
            interval: interval.to_string(),
        }
    }
}

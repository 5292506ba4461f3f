use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};

use super::calendar::Calendar;
use crate::{Bin, BinningConfig, Dated, EmptyBins, EndDatePolicy, GlodaError, Interval};

/// Bin items by interval using the default configuration (UTC, Sunday weeks,
/// latest end date, no empty bins).
///
/// # Errors
/// Same as [`Binner::bin`].
pub fn bin_by_interval<T, I>(items: I, interval: Interval) -> Result<Vec<Bin<T>>, GlodaError>
where
    T: Dated,
    I: IntoIterator<Item = T>,
{
    Binner::default().bin(items, interval)
}

/// Partitions dated items into ascending interval bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binner {
    calendar: Calendar,
    end_date: EndDatePolicy,
    empty_bins: EmptyBins,
}

impl Binner {
    /// Binner following `cfg`.
    #[must_use]
    pub const fn new(cfg: &BinningConfig) -> Self {
        Self {
            calendar: Calendar::from_config(cfg),
            end_date: cfg.end_date,
            empty_bins: cfg.empty_bins,
        }
    }

    /// The calendar used for rounding.
    #[must_use]
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Group `items` by `round_down(item.date(), interval)`.
    ///
    /// - Bins come back sorted ascending by `start_date`, one per distinct key.
    /// - Items keep their input order within a bin, and every input item lands
    ///   in exactly one bin.
    /// - `end_date` is `round_up` of the item that opened the bin under
    ///   `EndDatePolicy::Triggering`, or the latest `round_up` across the bin's
    ///   items under `EndDatePolicy::Latest`.
    /// - With `EmptyBins::Include`, every boundary between the first and last
    ///   bin also gets a bin (empty ones end at `round_up(start_date)`).
    /// - Empty input yields an empty list.
    ///
    /// # Errors
    /// - `InvalidInterval` for `Quarters`.
    /// - `IntervalEnumeration` if empty-bin mode would exceed the boundary cap.
    /// - `TimeOutOfRange` near the limits of `DateTime<Utc>`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "glodabin_core::bin::bin",
            skip(self, items),
            fields(end_date = ?self.end_date, empty_bins = ?self.empty_bins),
        )
    )]
    pub fn bin<T, I>(&self, items: I, interval: Interval) -> Result<Vec<Bin<T>>, GlodaError>
    where
        T: Dated,
        I: IntoIterator<Item = T>,
    {
        let interval = interval.supported()?;
        let mut slots: HashMap<DateTime<Utc>, usize> = HashMap::new();
        let mut bins: Vec<Bin<T>> = Vec::new();

        for item in items {
            let date = item.date();
            let key = self.calendar.round_down(date, interval)?;
            match slots.entry(key) {
                Entry::Occupied(slot) => {
                    let bin = &mut bins[*slot.get()];
                    if self.end_date == EndDatePolicy::Latest {
                        let end = self.calendar.round_up(date, interval)?;
                        if end > bin.end_date {
                            bin.end_date = end;
                        }
                    }
                    bin.items.push(item);
                }
                Entry::Vacant(slot) => {
                    slot.insert(bins.len());
                    bins.push(Bin {
                        items: vec![item],
                        start_date: key,
                        end_date: self.calendar.round_up(date, interval)?,
                    });
                }
            }
        }

        bins.sort_by_key(|b| b.start_date);

        if self.empty_bins == EmptyBins::Include {
            bins = self.fill_empty(bins, interval)?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(bins = bins.len(), "binned items");
        Ok(bins)
    }

    // Merge-join sorted bins with the enumerated boundaries of their span.
    fn fill_empty<T>(
        &self,
        bins: Vec<Bin<T>>,
        interval: Interval,
    ) -> Result<Vec<Bin<T>>, GlodaError> {
        if bins.is_empty() {
            return Ok(bins);
        }
        let first = bins[0].start_date;
        let last = bins[bins.len() - 1].start_date;
        let boundaries = self.calendar.enumerate_boundaries(first, last, interval)?;

        let mut out = Vec::with_capacity(boundaries.len().max(bins.len()));
        let mut pending = bins.into_iter().peekable();
        for b in boundaries.into_iter().take_while(|b| *b <= last) {
            while let Some(bin) = pending.next_if(|bin| bin.start_date < b) {
                out.push(bin);
            }
            if let Some(bin) = pending.next_if(|bin| bin.start_date == b) {
                out.push(bin);
            } else {
                out.push(Bin {
                    items: Vec::new(),
                    start_date: b,
                    end_date: self.calendar.round_up(b, interval)?,
                });
            }
        }
        out.extend(pending);
        Ok(out)
    }
}

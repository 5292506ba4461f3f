//! Item contract and bin containers.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use glodabin_types::Message;
use serde::{Deserialize, Serialize};

/// Anything that carries a timestamp and can therefore be binned.
///
/// The binner only reads the timestamp; it never mutates items. Implementations
/// for references and smart pointers let callers bin borrowed data.
pub trait Dated {
    /// The instant this item is filed under.
    fn date(&self) -> DateTime<Utc>;
}

impl Dated for DateTime<Utc> {
    fn date(&self) -> DateTime<Utc> {
        *self
    }
}

impl Dated for Message {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}

impl<T: Dated + ?Sized> Dated for Box<T> {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}

impl<T: Dated + ?Sized> Dated for Rc<T> {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}

impl<T: Dated + ?Sized> Dated for Arc<T> {
    fn date(&self) -> DateTime<Utc> {
        (**self).date()
    }
}

/// A time bucket holding the items whose rounded-down timestamp equals `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin<T> {
    /// Items in input order.
    pub items: Vec<T>,
    /// Inclusive lower boundary of the bucket.
    pub start_date: DateTime<Utc>,
    /// Upper boundary, derived from upward rounding of item timestamps.
    pub end_date: DateTime<Utc>,
}

impl<T> Bin<T> {
    /// Number of items in the bin.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the bin holds no items (only produced in empty-bin mode).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if `ts` falls in `[start_date, end_date)`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start_date <= ts && ts < self.end_date
    }
}

/// Bins from several named sources aligned on a shared `start_date`.
///
/// Every source passed to [`crate::fuse`] appears in `sources` for every fused
/// bin; sources without a bin at this boundary map to an empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusedBin<T> {
    /// Shared lower boundary.
    pub start_date: DateTime<Utc>,
    /// Latest end date among the sources that matched this boundary.
    pub end_date: DateTime<Utc>,
    /// Items per source name.
    pub sources: BTreeMap<String, Vec<T>>,
}

impl<T> FusedBin<T> {
    /// Items contributed by `source`, or an empty slice for unknown names.
    #[must_use]
    pub fn items(&self, source: &str) -> &[T] {
        self.sources.get(source).map_or(&[][..], Vec::as_slice)
    }

    /// Move out the items of `source`. The source stays listed with no items.
    pub fn take(&mut self, source: &str) -> Vec<T> {
        self.sources
            .get_mut(source)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Total number of items across all sources.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }
}

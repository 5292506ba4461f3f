//! Configuration types shared by the binning utilities and the history orchestrator.

use std::time::Duration;

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{GlodaError, Interval};

/// How a bin's `end_date` is derived from the items it holds.
///
/// Every item of a bin rounds up to the same boundary, so both policies give
/// the same end date; they differ only in how many items are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EndDatePolicy {
    /// The end date comes from the item that opened the bin and is never revisited.
    /// Matches the historical behaviour of the add-on.
    Triggering,
    /// The end date is the latest upward-rounded timestamp of any item in the bin.
    #[default]
    Latest,
}

/// Whether binning materializes buckets that received no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EmptyBins {
    /// Only buckets holding at least one item are returned.
    #[default]
    Skip,
    /// Every boundary between the earliest and latest item gets a bin, empty or not.
    Include,
}

/// Calendar and binning behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Zone in which calendar fields (year, month, day, hour) are read.
    pub timezone: Tz,
    /// First day of a week bucket.
    pub week_start: Weekday,
    /// End date derivation for bins.
    pub end_date: EndDatePolicy,
    /// Empty-bucket materialization.
    pub empty_bins: EmptyBins,
    /// Upper bound on boundaries produced by a single enumeration.
    pub max_boundaries: usize,
}

impl BinningConfig {
    /// Default cap on enumerated boundaries.
    pub const DEFAULT_MAX_BOUNDARIES: usize = 100_000;

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `Err(GlodaError::InvalidArg)` if `max_boundaries` is zero.
    pub fn validate(&self) -> Result<(), GlodaError> {
        if self.max_boundaries == 0 {
            return Err(GlodaError::InvalidArg(
                "max_boundaries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            week_start: Weekday::Sun,
            end_date: EndDatePolicy::default(),
            empty_bins: EmptyBins::default(),
            max_boundaries: Self::DEFAULT_MAX_BOUNDARIES,
        }
    }
}

/// Configuration for the contact history orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of top contacts to fetch (before filtering out the user).
    pub contact_limit: usize,
    /// Per-direction cap on messages fetched for each contact.
    pub per_contact_message_limit: usize,
    /// Granularity of the fused history.
    pub interval: Interval,
    /// Optional timeout applied to each index call.
    pub index_timeout: Option<Duration>,
    /// Calendar and binning behaviour.
    pub binning: BinningConfig,
}

impl HistoryConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// - `InvalidArg` if either limit is zero, the timeout is zero, or the binning
    ///   config is invalid.
    /// - `InvalidInterval` if `interval` is not supported.
    pub fn validate(&self) -> Result<(), GlodaError> {
        if self.contact_limit == 0 {
            return Err(GlodaError::InvalidArg(
                "contact_limit must be at least 1".into(),
            ));
        }
        if self.per_contact_message_limit == 0 {
            return Err(GlodaError::InvalidArg(
                "per_contact_message_limit must be at least 1".into(),
            ));
        }
        if self.index_timeout.is_some_and(|t| t.is_zero()) {
            return Err(GlodaError::InvalidArg(
                "index_timeout must be non-zero".into(),
            ));
        }
        self.interval.supported()?;
        self.binning.validate()
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            contact_limit: 20,
            per_contact_message_limit: 2500,
            interval: Interval::Months,
            index_timeout: None,
            binning: BinningConfig::default(),
        }
    }
}

//! Temporal binning utilities.
//!
//! Modules, leaves first:
//! - `calendar`: round instants to interval boundaries; nominal step sizes
//! - `boundaries`: enumerate the boundaries covering a time range
//! - `bin`: partition dated items into ascending interval bins
//! - `fuse`: align several bin lists on shared start dates
/// Message binning by interval.
pub mod bin;
/// Interval boundary enumeration.
pub mod boundaries;
/// Interval rounding in a local time zone.
pub mod calendar;
/// Fusion of independently binned series.
pub mod fuse;

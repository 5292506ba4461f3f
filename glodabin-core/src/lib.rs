//! glodabin-core
//!
//! Core types, traits, and utilities shared across the glodabin workspace.
//!
//! - `types`: the `Dated` item contract plus `Bin` and `FusedBin`.
//! - `binning`: interval calendar, bucket enumeration, message binning, bin fusion.
//! - `index`: the `MessageIndex` trait a host implements to feed message history.
//!
//! Everything under `binning` is synchronous and pure: no shared state, no I/O.
//! Independent invocations can run in parallel freely.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use glodabin_core::{Interval, bin_by_interval};
//!
//! let dates = vec![
//!     Utc.with_ymd_and_hms(2021, 1, 15, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2021, 1, 20, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2021, 2, 3, 9, 0, 0).unwrap(),
//! ];
//! let bins = bin_by_interval(dates, Interval::Months).unwrap();
//! assert_eq!(bins.len(), 2);
//! assert_eq!(bins[0].items.len(), 2);
//! assert_eq!(bins[1].start_date, Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap());
//! ```
#![warn(missing_docs)]

/// Interval rounding, boundary enumeration, binning, and fusion.
pub mod binning;
/// The message index contract consumed by the history orchestrator.
pub mod index;
pub mod types;

pub use binning::bin::{Binner, bin_by_interval};
pub use binning::boundaries::enumerate_boundaries;
pub use binning::calendar::{Calendar, nominal_step_millis};
pub use binning::fuse::fuse;
pub use glodabin_types::{
    BinningConfig, Contact, ContactId, EmptyBins, EndDatePolicy, GlodaError, HistoryConfig,
    Identity, Interval, Message, MessageId,
};
pub use index::{Direction, MessageIndex, MessageQuery};
pub use types::*;

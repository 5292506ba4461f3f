//! Glodabin builds per-contact mail histories on top of a message index.
//!
//! Overview
//! - Reads contacts and messages through the `glodabin_core::MessageIndex` trait.
//! - For each top contact, queries messages in both directions using the full
//!   cartesian product of the user's and the contact's identities.
//! - Bins each direction by calendar interval and fuses the two series so that
//!   every interval carries both a "from me" and a "to me" list.
//!
//! Behavior
//! - The user's own contact is never part of the result.
//! - Contacts are processed concurrently; output keeps the index's order.
//! - Any index failure or timeout fails the whole request. There is no partial
//!   result and nothing is retried.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use glodabin::{Glodabin, Interval};
//! use glodabin_mock::MockIndex;
//!
//! let glodabin = Glodabin::builder()
//!     .with_index(Arc::new(MockIndex::new()))
//!     .interval(Interval::Months)
//!     .build()?;
//! for history in glodabin.top_contacts_with_personal_history().await? {
//!     for bin in &history.by_interval {
//!         println!("{} {}: {} sent, {} received",
//!             history.contact.name, bin.start_date, bin.from_me.len(), bin.to_me.len());
//!     }
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod history;

pub use core::{Glodabin, GlodabinBuilder};
pub use history::{ContactHistory, PersonalBin};

// Re-export core types for convenience
pub use glodabin_core::{
    Bin, Binner, BinningConfig, Calendar, Contact, ContactId, Dated, Direction, EmptyBins,
    EndDatePolicy, FusedBin, GlodaError, HistoryConfig, Identity, Interval, Message, MessageId,
    MessageIndex, MessageQuery, bin_by_interval, enumerate_boundaries, fuse,
};

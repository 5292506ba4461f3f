//! Glodabin-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod interval;
mod message;

pub use config::{BinningConfig, EmptyBins, EndDatePolicy, HistoryConfig};
pub use error::GlodaError;
pub use interval::Interval;
pub use message::{Contact, ContactId, Identity, Message, MessageId};

//! Mail-index records as seen through the consumed index interface.
//!
//! These are deliberately thin: the index owns the real objects, and the
//! binning utilities only ever read `Message::date`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a contact within one index.
pub type ContactId = i64;
/// Identifier of a message within one index.
pub type MessageId = i64;

/// One address-like identity belonging to a contact (for example an email address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    /// Identity kind, e.g. `"email"`.
    pub kind: String,
    /// Identity value, e.g. `"alice@example.com"`.
    pub value: String,
}

impl Identity {
    /// Build an `email` identity.
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: "email".to_string(),
            value: value.into(),
        }
    }
}

/// A person known to the index, with every identity they use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Index-assigned identifier.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Popularity score; higher means more frequent correspondence.
    pub popularity: i64,
    /// Identities (addresses) of this contact.
    pub identities: Vec<Identity>,
}

/// A message summary carrying the fields history views need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Index-assigned identifier.
    pub id: MessageId,
    /// Timestamp of the message.
    pub date: DateTime<Utc>,
    /// Subject line.
    pub subject: String,
    /// Sender identity.
    pub from: Identity,
    /// Recipient identities.
    pub to: Vec<Identity>,
}

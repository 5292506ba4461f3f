// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

pub mod counting_index;

pub use counting_index::CountingIndex;

use std::sync::Arc;

use glodabin::{Contact, Glodabin, Identity, Message};
use glodabin_mock::MockIndex;

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32) -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    chrono::Utc.with_ymd_and_hms(y, m, d, hh, 0, 0).unwrap()
}

pub fn contact(id: i64, name: &str, addrs: &[&str]) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        popularity: 0,
        identities: addrs.iter().map(|a| Identity::email(*a)).collect(),
    }
}

pub fn message(id: i64, date: chrono::DateTime<chrono::Utc>, from: &str, to: &str) -> Message {
    Message {
        id,
        date,
        subject: format!("#{id}"),
        from: Identity::email(from),
        to: vec![Identity::email(to)],
    }
}

/// A `Glodabin` over the fixture mock index with default configuration.
pub fn mock_glodabin() -> Glodabin {
    Glodabin::builder()
        .with_index(Arc::new(MockIndex::new()))
        .build()
        .unwrap()
}

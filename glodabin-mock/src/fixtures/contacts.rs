use glodabin_core::{Contact, ContactId, Identity};

pub const ME: ContactId = 1;
pub const ALICE: ContactId = 2;
pub const BOB: ContactId = 3;
pub const CAROL: ContactId = 4;
pub const DAVE: ContactId = 5;

fn c(id: ContactId, name: &str, popularity: i64, addrs: &[&str]) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        popularity,
        identities: addrs.iter().map(|a| Identity::email(*a)).collect(),
    }
}

pub fn me() -> Contact {
    c(ME, "Me", 100, &["me@example.com", "me@work.example"])
}

/// Every fixture contact, the user included, in no particular order.
pub fn all() -> Vec<Contact> {
    vec![
        c(CAROL, "Carol Danvers", 30, &["carol@example.com"]),
        me(),
        c(BOB, "Bob Builder", 60, &["bob@example.net"]),
        c(ALICE, "Alice Liddell", 80, &["alice@example.org", "alice@wonder.land"]),
        // No identities: every query for Dave is empty.
        c(DAVE, "Dave Null", 10, &[]),
    ]
}

pub fn failing() -> Contact {
    c(90, crate::MockIndex::FAIL, 0, &["fail@example.com"])
}

pub fn slow() -> Contact {
    c(91, crate::MockIndex::TIMEOUT, 0, &["timeout@example.com"])
}

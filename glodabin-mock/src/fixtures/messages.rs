use chrono::{DateTime, TimeZone, Utc};
use glodabin_core::{Identity, Message, MessageId};

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hh, mm, 0).unwrap()
}

fn m(id: MessageId, date: DateTime<Utc>, subject: &str, from: &str, to: &[&str]) -> Message {
    Message {
        id,
        date,
        subject: subject.to_string(),
        from: Identity::email(from),
        to: to.iter().map(|a| Identity::email(*a)).collect(),
    }
}

pub fn all() -> Vec<Message> {
    vec![
        m(1, at(2021, 1, 5, 10, 0), "New year plans", "me@example.com", &["alice@example.org"]),
        m(2, at(2021, 1, 7, 9, 30), "Re: New year plans", "alice@example.org", &["me@example.com"]),
        m(3, at(2021, 1, 21, 18, 0), "Tea party", "alice@wonder.land", &["me@work.example"]),
        m(4, at(2021, 2, 14, 12, 0), "Re: Tea party", "me@work.example", &["alice@wonder.land"]),
        m(5, at(2021, 3, 2, 8, 15), "March agenda", "alice@example.org", &["me@example.com"]),
        m(6, at(2021, 1, 10, 14, 0), "Can we fix it?", "me@example.com", &["bob@example.net"]),
        m(7, at(2021, 3, 15, 16, 45), "Yes we can", "bob@example.net", &["me@example.com"]),
        m(
            8,
            at(2021, 3, 16, 7, 0),
            "Site visit",
            "bob@example.net",
            &["me@example.com", "alice@example.org"],
        ),
        m(9, at(2021, 2, 1, 11, 0), "Not for you", "alice@example.org", &["bob@example.net"]),
        m(10, at(2021, 2, 2, 11, 0), "Ping", "fail@example.com", &["me@example.com"]),
        m(11, at(2021, 2, 3, 11, 0), "Pong", "timeout@example.com", &["me@example.com"]),
    ]
}

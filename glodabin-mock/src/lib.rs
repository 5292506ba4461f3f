use std::time::Duration;

use async_trait::async_trait;
use glodabin_core::{Contact, ContactId, GlodaError, Message, MessageIndex, MessageQuery};

pub mod fixtures;

/// Mock index for CI-safe tests and demos. Serves deterministic data from static fixtures.
///
/// Message queries whose other party is named [`MockIndex::FAIL`] fail, and
/// those naming [`MockIndex::TIMEOUT`] are delayed before answering.
#[derive(Debug, Clone)]
pub struct MockIndex {
    me: Contact,
    contacts: Vec<Contact>,
    messages: Vec<Message>,
}

impl Default for MockIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIndex {
    /// Contact name whose message queries fail.
    pub const FAIL: &'static str = "FAIL";
    /// Contact name whose message queries are slow.
    pub const TIMEOUT: &'static str = "TIMEOUT";
    /// Delay applied to queries involving a `TIMEOUT` contact.
    pub const DELAY: Duration = Duration::from_millis(200);

    /// Index over the fixture contacts and messages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            me: fixtures::contacts::me(),
            contacts: fixtures::contacts::all(),
            messages: fixtures::messages::all(),
        }
    }

    /// Index with only the user's own contact and no messages.
    #[must_use]
    pub fn empty() -> Self {
        let me = fixtures::contacts::me();
        Self {
            contacts: vec![me.clone()],
            me,
            messages: Vec::new(),
        }
    }

    /// Add a contact.
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.push(contact);
        self
    }

    /// Add a message.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add the `FAIL` and `TIMEOUT` contacts.
    #[must_use]
    pub fn with_misbehaving_contacts(self) -> Self {
        self.with_contact(fixtures::contacts::failing())
            .with_contact(fixtures::contacts::slow())
    }

    // Contacts owning any "their" identity of the query.
    fn counterparts<'a>(&'a self, query: &'a MessageQuery) -> impl Iterator<Item = &'a Contact> {
        self.contacts.iter().filter(move |c| {
            query
                .pairs
                .iter()
                .any(|(_, theirs)| c.identities.contains(theirs))
        })
    }

    async fn maybe_fail_or_delay(&self, query: &MessageQuery) -> Result<(), GlodaError> {
        let mut delay = false;
        for c in self.counterparts(query) {
            match c.name.as_str() {
                Self::FAIL => {
                    return Err(GlodaError::index(
                        "glodabin-mock",
                        format!("forced failure: messages with {}", c.name),
                    ));
                }
                Self::TIMEOUT => delay = true,
                _ => {}
            }
        }
        if delay {
            tokio::time::sleep(Self::DELAY).await;
        }
        Ok(())
    }
}

#[async_trait]
impl MessageIndex for MockIndex {
    fn name(&self) -> &'static str {
        "glodabin-mock"
    }

    async fn my_contact(&self) -> Result<Contact, GlodaError> {
        Ok(self.me.clone())
    }

    async fn contact(&self, id: ContactId) -> Result<Option<Contact>, GlodaError> {
        Ok(self.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn top_contacts(&self, limit: usize) -> Result<Vec<Contact>, GlodaError> {
        let mut out = self.contacts.clone();
        out.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        out.truncate(limit);
        Ok(out)
    }

    async fn messages(&self, query: &MessageQuery) -> Result<Vec<Message>, GlodaError> {
        self.maybe_fail_or_delay(query).await?;
        let mut out: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| query.matches(m))
            .cloned()
            .collect();
        // Most recent first.
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out.truncate(query.limit);
        Ok(out)
    }
}

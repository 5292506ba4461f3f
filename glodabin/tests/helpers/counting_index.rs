use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use glodabin::{Contact, ContactId, GlodaError, Message, MessageIndex, MessageQuery};

/// In-memory index that records how often each method is called.
pub struct CountingIndex {
    pub me: Contact,
    pub contacts: Vec<Contact>,
    pub messages: Vec<Message>,
    pub top_contacts_calls: Arc<AtomicUsize>,
    pub messages_calls: Arc<AtomicUsize>,
    pub last_limit: Arc<AtomicUsize>,
}

impl CountingIndex {
    pub fn new(me: Contact, contacts: Vec<Contact>, messages: Vec<Message>) -> Self {
        Self {
            me,
            contacts,
            messages,
            top_contacts_calls: Arc::new(AtomicUsize::new(0)),
            messages_calls: Arc::new(AtomicUsize::new(0)),
            last_limit: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl MessageIndex for CountingIndex {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn my_contact(&self) -> Result<Contact, GlodaError> {
        Ok(self.me.clone())
    }

    async fn contact(&self, id: ContactId) -> Result<Option<Contact>, GlodaError> {
        Ok(self.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn top_contacts(&self, limit: usize) -> Result<Vec<Contact>, GlodaError> {
        self.top_contacts_calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        Ok(self.contacts.iter().take(limit).cloned().collect())
    }

    async fn messages(&self, query: &MessageQuery) -> Result<Vec<Message>, GlodaError> {
        self.messages_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .messages
            .iter()
            .filter(|m| query.matches(m))
            .take(query.limit)
            .cloned()
            .collect())
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Contact, ContactId, GlodaError, Identity, Message};

/// Which side of a conversation the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Messages the user sent to the other contact.
    FromMe,
    /// Messages the other contact sent to the user.
    ToMe,
}

impl Direction {
    /// Source label used when fusing the two directions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromMe => "from_me",
            Self::ToMe => "to_me",
        }
    }
}

/// A disjunction of `(my identity, their identity)` pairs in one direction.
///
/// A message matches when, for at least one pair, the sender and a recipient
/// line up with the query's direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuery {
    /// Which party sent the message.
    pub direction: Direction,
    /// Every pair is `(me, them)`; the user's identity always comes first.
    pub pairs: Vec<(Identity, Identity)>,
    /// Maximum number of messages to return.
    pub limit: usize,
}

impl MessageQuery {
    /// Messages sent by any identity of `me` to any identity of `other`.
    #[must_use]
    pub fn from_me(me: &Contact, other: &Contact, limit: usize) -> Self {
        Self::cartesian(Direction::FromMe, me, other, limit)
    }

    /// Messages sent by any identity of `other` to any identity of `me`.
    #[must_use]
    pub fn to_me(me: &Contact, other: &Contact, limit: usize) -> Self {
        Self::cartesian(Direction::ToMe, me, other, limit)
    }

    fn cartesian(direction: Direction, me: &Contact, other: &Contact, limit: usize) -> Self {
        let pairs = me
            .identities
            .iter()
            .flat_map(|mine| {
                other
                    .identities
                    .iter()
                    .map(move |theirs| (mine.clone(), theirs.clone()))
            })
            .collect();
        Self {
            direction,
            pairs,
            limit,
        }
    }

    /// True if the query has no identity pairs and can never match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `message` satisfies at least one pair in this query's direction.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.pairs.iter().any(|(mine, theirs)| {
            let (sender, recipient) = match self.direction {
                Direction::FromMe => (mine, theirs),
                Direction::ToMe => (theirs, mine),
            };
            message.from == *sender && message.to.contains(recipient)
        })
    }
}

/// The mail index the history orchestrator reads from.
///
/// Implementations own contact and message storage. Each method is one
/// independent lookup; the orchestrator may call them concurrently.
#[async_trait]
pub trait MessageIndex: Send + Sync {
    /// Short identifier used in errors and logs.
    fn name(&self) -> &'static str;

    /// The contact representing the user.
    async fn my_contact(&self) -> Result<Contact, GlodaError>;

    /// The contact with `id`, or `None` if the index does not know it.
    async fn contact(&self, id: ContactId) -> Result<Option<Contact>, GlodaError>;

    /// Contacts ordered by descending popularity, at most `limit` of them.
    async fn top_contacts(&self, limit: usize) -> Result<Vec<Contact>, GlodaError>;

    /// Messages matching `query`, at most `query.limit` of them.
    async fn messages(&self, query: &MessageQuery) -> Result<Vec<Message>, GlodaError>;
}

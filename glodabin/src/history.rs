use chrono::{DateTime, Utc};
use glodabin_core::{
    Bin, Binner, Contact, Direction, FusedBin, GlodaError, Message, MessageQuery, fuse,
};
use serde::{Deserialize, Serialize};

use crate::Glodabin;

/// One interval of a contact's history, split by direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBin {
    /// Inclusive lower boundary.
    pub start_date: DateTime<Utc>,
    /// Upper boundary (latest end date of the two directions).
    pub end_date: DateTime<Utc>,
    /// Messages the user sent in this interval.
    pub from_me: Vec<Message>,
    /// Messages the user received in this interval.
    pub to_me: Vec<Message>,
}

impl PersonalBin {
    fn from_fused(mut fused: FusedBin<Message>) -> Self {
        Self {
            start_date: fused.start_date,
            end_date: fused.end_date,
            from_me: fused.take(Direction::FromMe.as_str()),
            to_me: fused.take(Direction::ToMe.as_str()),
        }
    }

    /// Messages in both directions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.from_me.len() + self.to_me.len()
    }
}

/// A contact's correspondence with the user, flat and binned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactHistory {
    /// The other party.
    pub contact: Contact,
    /// Every message the user sent to `contact`, most recent first as returned
    /// by the index.
    pub from_me: Vec<Message>,
    /// Every message `contact` sent to the user.
    pub to_me: Vec<Message>,
    /// Both directions binned at the configured interval, ascending.
    pub by_interval: Vec<PersonalBin>,
}

impl Glodabin {
    /// Fetch the top contacts and build each one's personal history.
    ///
    /// Behavior:
    /// - Asks the index for `contact_limit` contacts and drops the user's own
    ///   contact (matched by id), so fewer than `contact_limit` may come back.
    /// - Each contact's two directional queries run concurrently with every
    ///   other contact's.
    /// - Results keep the index's contact order.
    ///
    /// # Errors
    /// The first index failure or timeout aborts the whole request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "glodabin::history::top_contacts_with_personal_history",
            skip(self),
            fields(index = self.index.name(), limit = self.cfg.contact_limit),
        )
    )]
    pub async fn top_contacts_with_personal_history(
        &self,
    ) -> Result<Vec<ContactHistory>, GlodaError> {
        let (me, contacts) = futures::try_join!(
            self.index_call("my_contact", self.index.my_contact()),
            self.index_call(
                "top_contacts",
                self.index.top_contacts(self.cfg.contact_limit)
            ),
        )?;

        #[cfg(feature = "tracing")]
        tracing::debug!(fetched = contacts.len(), user = me.id, "skipping the user's own contact");
        let tasks = contacts
            .into_iter()
            .filter(|c| c.id != me.id)
            .map(|contact| self.history_for(&me, contact));
        let out = futures::future::try_join_all(tasks).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(contacts = out.len(), "built contact histories");
        Ok(out)
    }

    /// Build the personal history of a single contact.
    ///
    /// The contact is looked up by id, and the index's current record (its
    /// identities in particular) drives the queries.
    ///
    /// # Errors
    /// - `InvalidArg` if `contact` is the user's own contact.
    /// - `NotFound` if the index has no contact with that id.
    /// - Any index failure or timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "glodabin::history::contact_personal_history",
            skip(self, contact),
            fields(index = self.index.name(), contact = contact.id),
        )
    )]
    pub async fn contact_personal_history(
        &self,
        contact: &Contact,
    ) -> Result<ContactHistory, GlodaError> {
        let (me, known) = futures::try_join!(
            self.index_call("my_contact", self.index.my_contact()),
            self.index_call("contact", self.index.contact(contact.id)),
        )?;
        if me.id == contact.id {
            return Err(GlodaError::InvalidArg(
                "personal history of the user's own contact".to_string(),
            ));
        }
        let Some(known) = known else {
            return Err(GlodaError::not_found(format!("contact {}", contact.id)));
        };
        self.history_for(&me, known).await
    }

    async fn history_for(
        &self,
        me: &Contact,
        contact: Contact,
    ) -> Result<ContactHistory, GlodaError> {
        let limit = self.cfg.per_contact_message_limit;
        let from_me_q = MessageQuery::from_me(me, &contact, limit);
        let to_me_q = MessageQuery::to_me(me, &contact, limit);
        let (from_me, to_me) = futures::try_join!(self.query(&from_me_q), self.query(&to_me_q))?;

        let by_interval = self.bin_and_fuse(&from_me, &to_me)?;
        Ok(ContactHistory {
            contact,
            from_me,
            to_me,
            by_interval,
        })
    }

    async fn query(&self, q: &MessageQuery) -> Result<Vec<Message>, GlodaError> {
        if q.is_empty() {
            return Ok(Vec::new());
        }
        self.index_call("messages", self.index.messages(q)).await
    }

    fn bin_and_fuse(
        &self,
        from_me: &[Message],
        to_me: &[Message],
    ) -> Result<Vec<PersonalBin>, GlodaError> {
        let binner = Binner::new(&self.cfg.binning);
        let interval = self.cfg.interval;
        let sent: Vec<Bin<Message>> = binner.bin(from_me.iter().cloned(), interval)?;
        let received: Vec<Bin<Message>> = binner.bin(to_me.iter().cloned(), interval)?;
        let fused = fuse([
            (Direction::FromMe.as_str(), sent),
            (Direction::ToMe.as_str(), received),
        ])?;
        Ok(fused.into_iter().map(PersonalBin::from_fused).collect())
    }
}

use chirp_db::models;
use chirp_types::models::Message;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::{Chirp, Session, policy};

impl Chirp {
    /// Post a message as the session user. Text is trimmed and must be
    /// non-empty and within the configured length.
    pub fn create_message(&self, session: &Session, text: &str) -> Result<Message> {
        let me = self.authorize(session)?;
        let text = self.validate_text(text)?;

        let row = self.db.insert_message(Uuid::new_v4(), me.id, text)?;
        debug!(message_id = %row.id, author_id = %me.id, "message created");
        Ok(row.into_message()?)
    }

    pub fn get_message(&self, id: Uuid) -> Result<Message> {
        let row = self.db.get_message(id)?.ok_or(CoreError::NotFound("message"))?;
        Ok(row.into_message()?)
    }

    /// Delete a message the session user wrote, along with its likes.
    ///
    /// Anonymous callers are rejected before the lookup, so they cannot probe
    /// which ids exist. Signed-in callers get `NotFound` for a missing id and
    /// `Unauthorized` for someone else's message.
    pub fn delete_message(&self, session: &Session, id: Uuid) -> Result<()> {
        let me = self.authorize(session)?;
        let message = self.get_message(id)?;

        if let Err(e) = policy::can_delete_message(Some(&me), &message) {
            warn!(message_id = %id, requester = %me.id, "delete of someone else's message");
            return Err(e);
        }

        if !self.db.delete_message(id)? {
            return Err(CoreError::NotFound("message"));
        }
        debug!(message_id = %id, "message deleted");
        Ok(())
    }

    /// A user's own messages, newest first.
    pub fn messages_by_author(&self, author: Uuid, limit: Option<u32>) -> Result<Vec<Message>> {
        if !self.db.user_exists(author)? {
            return Err(CoreError::NotFound("user"));
        }
        let rows = self.db.messages_by_author(author, self.page_limit(limit))?;
        Ok(models::into_messages(rows)?)
    }

    fn validate_text<'a>(&self, raw: &'a str) -> Result<&'a str> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(CoreError::invalid("text", "must not be empty"));
        }
        let max = self.config.message_max_len;
        if text.chars().count() > max {
            return Err(CoreError::invalid("text", format!("must be at most {max} characters")));
        }
        Ok(text)
    }
}

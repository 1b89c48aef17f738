use chirp_db::models;
use chirp_types::models::Message;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::{Chirp, Session};

impl Chirp {
    /// Like the message if the session user hasn't yet, unlike it if they
    /// have. Returns true if the message is liked afterwards. Liking your own
    /// message is allowed.
    pub fn toggle_like(&self, session: &Session, message_id: Uuid) -> Result<bool> {
        let me = self.authorize(session)?;
        if self.db.get_message(message_id)?.is_none() {
            return Err(CoreError::NotFound("message"));
        }

        let liked = self.db.toggle_like(me.id, message_id)?;
        debug!(user_id = %me.id, %message_id, liked, "like toggled");
        Ok(liked)
    }

    pub fn has_liked(&self, user: Uuid, message_id: Uuid) -> Result<bool> {
        Ok(self.db.like_exists(user, message_id)?)
    }

    pub fn like_count(&self, message_id: Uuid) -> Result<u64> {
        Ok(self.db.like_count(message_id)?)
    }

    /// Messages `user` has liked, newest first. Needs a signed-in viewer.
    pub fn liked_messages(&self, session: &Session, user: Uuid) -> Result<Vec<Message>> {
        self.check_connections_view(session, user)?;
        Ok(models::into_messages(self.db.liked_messages(user)?)?)
    }
}

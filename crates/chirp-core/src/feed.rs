use chirp_db::models;
use chirp_types::models::Message;

use crate::error::Result;
use crate::{Chirp, Session};

impl Chirp {
    /// The session user's home feed: their own messages plus those of
    /// everyone they follow, newest first. `limit` is capped at the
    /// configured page size.
    pub fn home_feed(&self, session: &Session, limit: Option<u32>) -> Result<Vec<Message>> {
        let me = self.authorize(session)?;
        let rows = self.db.home_feed(me.id, self.page_limit(limit))?;
        Ok(models::into_messages(rows)?)
    }
}

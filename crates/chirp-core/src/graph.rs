use chirp_db::models;
use chirp_types::models::User;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::{Chirp, Session, policy};

impl Chirp {
    /// Follow `followed` as the session user. Following yourself is rejected;
    /// following someone twice is a no-op.
    pub fn follow(&self, session: &Session, followed: Uuid) -> Result<()> {
        let me = self.authorize(session)?;
        if me.id == followed {
            return Err(CoreError::invalid("followed", "users cannot follow themselves"));
        }
        if !self.db.user_exists(followed)? {
            return Err(CoreError::NotFound("user"));
        }

        if self.db.insert_follow(me.id, followed)? {
            debug!(follower = %me.id, %followed, "follow added");
        }
        Ok(())
    }

    /// Stop following `followed`. Not following them already is fine.
    pub fn unfollow(&self, session: &Session, followed: Uuid) -> Result<()> {
        let me = self.authorize(session)?;
        if self.db.delete_follow(me.id, followed)? {
            debug!(follower = %me.id, %followed, "follow removed");
        }
        Ok(())
    }

    /// Does `user` follow `other`?
    pub fn is_following(&self, user: Uuid, other: Uuid) -> Result<bool> {
        Ok(self.db.follow_exists(user, other)?)
    }

    /// Is `user` followed by `other`?
    pub fn is_followed_by(&self, user: Uuid, other: Uuid) -> Result<bool> {
        Ok(self.db.follow_exists(other, user)?)
    }

    /// Who follows `user`, by username. Needs a signed-in viewer.
    pub fn followers(&self, session: &Session, user: Uuid) -> Result<Vec<User>> {
        self.check_connections_view(session, user)?;
        Ok(models::into_users(self.db.list_followers(user)?)?)
    }

    /// Whom `user` follows, by username. Needs a signed-in viewer.
    pub fn following(&self, session: &Session, user: Uuid) -> Result<Vec<User>> {
        self.check_connections_view(session, user)?;
        Ok(models::into_users(self.db.list_following(user)?)?)
    }

    pub(crate) fn check_connections_view(&self, session: &Session, user: Uuid) -> Result<()> {
        let current = self.current_user(session)?;
        policy::can_view_connections(current.as_ref())?;
        if !self.db.user_exists(user)? {
            return Err(CoreError::NotFound("user"));
        }
        Ok(())
    }
}

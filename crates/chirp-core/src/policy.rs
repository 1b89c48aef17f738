//! Authorization predicates.
//!
//! Pure functions over the resolved current user and the resource being
//! touched. They never hit the store, so they can be tested on their own;
//! the service resolves the session first and then asks these.

use chirp_types::models::Message;
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// The user a session resolved to for the duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

/// Every mutation needs somebody behind it.
pub fn require_user(current: Option<&CurrentUser>) -> Result<&CurrentUser> {
    current.ok_or(CoreError::Unauthorized)
}

/// Only the author may delete a message.
pub fn can_delete_message(current: Option<&CurrentUser>, message: &Message) -> Result<()> {
    let user = require_user(current)?;
    if user.id != message.author_id {
        return Err(CoreError::Unauthorized);
    }
    Ok(())
}

/// Follower, following and likes lists are visible to any signed-in user.
pub fn can_view_connections(current: Option<&CurrentUser>) -> Result<()> {
    require_user(current).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn user(name: &str) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: name.into(),
        }
    }

    fn message_by(author: &CurrentUser) -> Message {
        Message {
            id: Uuid::new_v4(),
            author_id: author.id,
            author_username: author.username.clone(),
            text: "hello".into(),
            created_at: chrono::Utc::now(),
        }
    }

    fn kind(res: Result<()>) -> Option<ErrorKind> {
        res.err().map(|e| e.kind())
    }

    #[test]
    fn anonymous_is_rejected_everywhere() {
        let owner = user("owner");
        let msg = message_by(&owner);

        assert!(require_user(None).is_err());
        assert_eq!(kind(can_delete_message(None, &msg)), Some(ErrorKind::Unauthorized));
        assert_eq!(kind(can_view_connections(None)), Some(ErrorKind::Unauthorized));
    }

    #[test]
    fn only_author_deletes() {
        let owner = user("owner");
        let other = user("other");
        let msg = message_by(&owner);

        assert!(can_delete_message(Some(&owner), &msg).is_ok());
        assert_eq!(
            kind(can_delete_message(Some(&other), &msg)),
            Some(ErrorKind::Unauthorized)
        );
    }

    #[test]
    fn any_user_views_any_connections() {
        assert!(can_view_connections(Some(&user("someone"))).is_ok());
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The only session state the core cares about: who the caller claims to be.
///
/// The id is a claim, not a proof of existence. The core re-resolves it
/// against the user table on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<Uuid>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

//! Core operations for the chirp micro-blog: identity, follow graph,
//! messages, likes and the home feed, each gated by the policies in
//! [`policy`].
//!
//! Every operation that acts on behalf of someone takes a [`Session`]. The
//! session's user id is resolved against the store on each call; an id that
//! names no user is treated as no session at all.

pub mod config;
pub mod error;
pub mod feed;
pub mod graph;
pub mod identity;
pub mod likes;
pub mod messages;
pub mod password;
pub mod policy;

pub use chirp_types::session::Session;
pub use config::CoreConfig;
pub use error::{CoreError, ErrorKind, Result};
pub use policy::CurrentUser;

use std::path::Path;

use chirp_db::Database;
use tracing::warn;

pub struct Chirp {
    db: Database,
    config: CoreConfig,
}

impl Chirp {
    pub fn new(db: Database, config: CoreConfig) -> Self {
        Self { db, config }
    }

    pub fn open(path: &Path, config: CoreConfig) -> Result<Self> {
        Ok(Self::new(Database::open(path)?, config))
    }

    pub fn open_in_memory(config: CoreConfig) -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?, config))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Resolve the session to a live user, or `None` if it names nobody.
    pub fn current_user(&self, session: &Session) -> Result<Option<CurrentUser>> {
        let Some(id) = session.user_id else {
            return Ok(None);
        };

        match self.db.get_user_by_id(id)? {
            Some(row) => Ok(Some(CurrentUser {
                id,
                username: row.username,
            })),
            None => {
                warn!(user_id = %id, "session names an unknown user");
                Ok(None)
            }
        }
    }

    /// Resolve the session and require that it names a user.
    pub(crate) fn authorize(&self, session: &Session) -> Result<CurrentUser> {
        let current = self.current_user(session)?;
        policy::require_user(current.as_ref()).cloned()
    }

    pub(crate) fn page_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.config.feed_limit)
            .min(self.config.feed_limit)
    }
}

use rusqlite::params;
use uuid::Uuid;

use crate::models::{USER_COLUMNS, UserRow, now_timestamp};
use crate::{Database, Result};

impl Database {
    /// Insert a follow edge. Returns false if the edge already existed.
    /// An unknown user on either end surfaces as `DbError::MissingReference`.
    pub fn insert_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO follows (follower_id, followed_id, created_at) VALUES (?1, ?2, ?3)",
                params![follower.to_string(), followed.to_string(), now_timestamp()],
            )?;
            Ok(inserted > 0)
        })
    }

    /// Remove a follow edge. Returns false if there was none.
    pub fn delete_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute(
                "DELETE FROM follows WHERE follower_id = ?1 AND followed_id = ?2",
                params![follower.to_string(), followed.to_string()],
            )?;
            Ok(removed > 0)
        })
    }

    pub fn follow_exists(&self, follower: Uuid, followed: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = ?1 AND followed_id = ?2)",
                params![follower.to_string(), followed.to_string()],
                |r| r.get(0),
            )?)
        })
    }

    /// Users following `user`, ordered by username.
    pub fn list_followers(&self, user: Uuid) -> Result<Vec<UserRow>> {
        self.query_follow_side(
            "JOIN follows f ON f.follower_id = u.id WHERE f.followed_id = ?1",
            user,
        )
    }

    /// Users `user` follows, ordered by username.
    pub fn list_following(&self, user: Uuid) -> Result<Vec<UserRow>> {
        self.query_follow_side(
            "JOIN follows f ON f.followed_id = u.id WHERE f.follower_id = ?1",
            user,
        )
    }

    fn query_follow_side(&self, join: &str, user: Uuid) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users u {join} ORDER BY u.username"
            ))?;
            let rows = stmt
                .query_map([user.to_string()], UserRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

use chirp_types::models::UserStats;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;
use uuid::Uuid;

use crate::models::{NewUser, ProfileUpdate, USER_COLUMNS, UserRow, now_timestamp};
use crate::{Database, Result};

impl Database {
    /// Insert a user and read the stored row back. A taken username or email
    /// surfaces as `DbError::Conflict` and nothing is written.
    pub fn insert_user(&self, user: &NewUser<'_>) -> Result<UserRow> {
        let id = user.id.to_string();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO users (id, username, email, password, image_url, header_image_url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    user.username,
                    user.email,
                    user.password_hash,
                    user.image_url,
                    user.header_image_url,
                    now_timestamp(),
                ],
            )?;
            let row = query_user(&tx, "u.id = ?1", &id)?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            tx.commit()?;
            Ok(row)
        })
    }

    pub fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "u.id = ?1", &id.to_string()))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "u.username = ?1", username))
    }

    pub fn user_exists(&self, id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                [id.to_string()],
                |r| r.get(0),
            )?)
        })
    }

    /// All users, or those whose username contains `query` ignoring case.
    /// Filtered in Rust: SQLite's `LIKE` only folds ASCII.
    pub fn list_users(&self, query: Option<&str>) -> Result<Vec<UserRow>> {
        let needle = query.map(str::to_lowercase);
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users u ORDER BY u.username"))?;
            let rows = stmt
                .query_map([], UserRow::from_row)?
                .filter(|row| match (&needle, row) {
                    (Some(needle), Ok(row)) => row.username.to_lowercase().contains(needle),
                    _ => true,
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Returns false if no user has this id.
    pub fn update_profile(&self, id: Uuid, update: &ProfileUpdate<'_>) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE users
                 SET username = ?2, email = ?3, image_url = ?4, header_image_url = ?5, bio = ?6, location = ?7
                 WHERE id = ?1",
                params![
                    id.to_string(),
                    update.username,
                    update.email,
                    update.image_url,
                    update.header_image_url,
                    update.bio,
                    update.location,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    /// Delete a user and everything that references them, in one transaction:
    /// likes on their messages, their own likes, follow edges in both
    /// directions, their messages, then the user row.
    pub fn delete_user(&self, id: Uuid) -> Result<bool> {
        let id = id.to_string();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM likes WHERE message_id IN (SELECT id FROM messages WHERE author_id = ?1)",
                [&id],
            )?;
            tx.execute("DELETE FROM likes WHERE user_id = ?1", [&id])?;
            tx.execute(
                "DELETE FROM follows WHERE follower_id = ?1 OR followed_id = ?1",
                [&id],
            )?;
            let messages = tx.execute("DELETE FROM messages WHERE author_id = ?1", [&id])?;
            let users = tx.execute("DELETE FROM users WHERE id = ?1", [&id])?;
            tx.commit()?;

            debug!(user_id = %id, messages, "user deleted");
            Ok(users > 0)
        })
    }

    pub fn user_stats(&self, id: Uuid) -> Result<UserStats> {
        self.with_conn(|conn| {
            let stats = conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM messages WHERE author_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE follower_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE followed_id = ?1),
                    (SELECT COUNT(*) FROM likes WHERE user_id = ?1)",
                [id.to_string()],
                |r| {
                    Ok(UserStats {
                        messages: r.get::<_, i64>(0)? as u64,
                        following: r.get::<_, i64>(1)? as u64,
                        followers: r.get::<_, i64>(2)? as u64,
                        likes: r.get::<_, i64>(3)? as u64,
                    })
                },
            )?;
            Ok(stats)
        })
    }
}

fn query_user(conn: &Connection, predicate: &str, value: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users u WHERE {predicate}"))?;
    let row = stmt.query_row([value], UserRow::from_row).optional()?;
    Ok(row)
}

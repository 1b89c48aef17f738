use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use crate::models::{MESSAGE_COLUMNS, MessageRow, now_timestamp};
use crate::{Database, Result};

impl Database {
    /// Toggle a like: removes it if present, inserts it if not.
    /// Returns true if the message is liked afterwards.
    pub fn toggle_like(&self, user_id: Uuid, message_id: Uuid) -> Result<bool> {
        let (user_id, message_id) = (user_id.to_string(), message_id.to_string());
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let existing: Option<String> = tx
                .query_row(
                    "SELECT created_at FROM likes WHERE user_id = ?1 AND message_id = ?2",
                    params![user_id, message_id],
                    |row| row.get(0),
                )
                .optional()?;

            let liked = if existing.is_some() {
                tx.execute(
                    "DELETE FROM likes WHERE user_id = ?1 AND message_id = ?2",
                    params![user_id, message_id],
                )?;
                false
            } else {
                tx.execute(
                    "INSERT INTO likes (user_id, message_id, created_at) VALUES (?1, ?2, ?3)",
                    params![user_id, message_id, now_timestamp()],
                )?;
                true
            };

            tx.commit()?;
            Ok(liked)
        })
    }

    pub fn like_exists(&self, user_id: Uuid, message_id: Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = ?1 AND message_id = ?2)",
                params![user_id.to_string(), message_id.to_string()],
                |r| r.get(0),
            )?)
        })
    }

    pub fn like_count(&self, message_id: Uuid) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM likes WHERE message_id = ?1",
                [message_id.to_string()],
                |r| r.get(0),
            )?;
            Ok(count as u64)
        })
    }

    /// Messages `user_id` has liked, newest message first.
    pub fn liked_messages(&self, user_id: Uuid) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS}
                 FROM likes l
                 JOIN messages m ON m.id = l.message_id
                 JOIN users u ON u.id = m.author_id
                 WHERE l.user_id = ?1
                 ORDER BY m.created_at DESC, m.rowid DESC"
            ))?;
            let rows = stmt
                .query_map([user_id.to_string()], MessageRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

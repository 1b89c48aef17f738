use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;
use uuid::Uuid;

use crate::models::{MESSAGE_COLUMNS, MessageRow, now_timestamp};
use crate::{Database, Result};

impl Database {
    /// Insert a message stamped with the current time and read it back with
    /// its author's username. An unknown author surfaces as
    /// `DbError::MissingReference`.
    pub fn insert_message(&self, id: Uuid, author_id: Uuid, text: &str) -> Result<MessageRow> {
        let id = id.to_string();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO messages (id, author_id, text, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![id, author_id.to_string(), text, now_timestamp()],
            )?;
            let row = query_message(&tx, &id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            tx.commit()?;
            Ok(row)
        })
    }

    pub fn get_message(&self, id: Uuid) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message(conn, &id.to_string()))
    }

    /// Delete a message and every like on it. Returns false if there was no
    /// such message.
    pub fn delete_message(&self, id: Uuid) -> Result<bool> {
        let id = id.to_string();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let likes = tx.execute("DELETE FROM likes WHERE message_id = ?1", [&id])?;
            let removed = tx.execute("DELETE FROM messages WHERE id = ?1", [&id])?;
            tx.commit()?;

            debug!(message_id = %id, likes, "message deleted");
            Ok(removed > 0)
        })
    }

    /// Messages by one author, newest first.
    pub fn messages_by_author(&self, author_id: Uuid, limit: u32) -> Result<Vec<MessageRow>> {
        self.query_messages(
            "WHERE m.author_id = ?1 ORDER BY m.created_at DESC, m.rowid DESC LIMIT ?2",
            author_id,
            limit,
        )
    }

    /// Messages by `user` and by everyone `user` follows, newest first.
    pub fn home_feed(&self, user: Uuid, limit: u32) -> Result<Vec<MessageRow>> {
        self.query_messages(
            "WHERE m.author_id = ?1
                OR m.author_id IN (SELECT followed_id FROM follows WHERE follower_id = ?1)
             ORDER BY m.created_at DESC, m.rowid DESC
             LIMIT ?2",
            user,
            limit,
        )
    }

    fn query_messages(&self, clause: &str, user: Uuid, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages m JOIN users u ON u.id = m.author_id {clause}"
            ))?;
            let rows = stmt
                .query_map(params![user.to_string(), limit], MessageRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_message(conn: &Connection, id: &str) -> Result<Option<MessageRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages m JOIN users u ON u.id = m.author_id WHERE m.id = ?1"
    ))?;
    let row = stmt.query_row([id], MessageRow::from_row).optional()?;
    Ok(row)
}

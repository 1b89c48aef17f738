use rusqlite::ffi;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// A FOREIGN KEY constraint rejected the write.
    #[error("referenced row does not exist: {0}")]
    MissingReference(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref e, ref msg) = err {
            let detail = msg.clone().unwrap_or_else(|| e.to_string());
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return DbError::Conflict(detail);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return DbError::MissingReference(detail);
                }
                _ => {}
            }
        }
        DbError::Sqlite(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        conn.execute_batch(
            "CREATE TABLE parent (id TEXT PRIMARY KEY, name TEXT UNIQUE);
             CREATE TABLE child (id TEXT PRIMARY KEY, parent_id TEXT NOT NULL REFERENCES parent(id));
             INSERT INTO parent (id, name) VALUES ('p1', 'one');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn unique_violation_is_conflict() {
        let err: DbError = conn()
            .execute("INSERT INTO parent (id, name) VALUES ('p2', 'one')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[test]
    fn primary_key_violation_is_conflict() {
        let err: DbError = conn()
            .execute("INSERT INTO parent (id, name) VALUES ('p1', 'two')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[test]
    fn foreign_key_violation_is_missing_reference() {
        let err: DbError = conn()
            .execute("INSERT INTO child (id, parent_id) VALUES ('c1', 'nope')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::MissingReference(_)));
    }

    #[test]
    fn other_errors_pass_through() {
        let err: DbError = conn()
            .execute("INSERT INTO nowhere VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::Sqlite(_)));
    }
}

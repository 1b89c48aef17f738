use chirp_db::DbError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures surfaced by core operations. The web layer maps these to
/// responses through [`CoreError::kind`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("already exists: {0}")]
    Uniqueness(String),

    /// Deliberately carries no detail: "not logged in" and "not yours" look
    /// the same to the caller.
    #[error("Access unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("storage failure: {0}")]
    Storage(#[source] DbError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Uniqueness,
    Unauthorized,
    NotFound,
    Internal,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Uniqueness(_) => ErrorKind::Uniqueness,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Hashing(_) | Self::Storage(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(detail) => Self::Uniqueness(detail),
            // Callers check the entities they reference; this only fires when
            // one vanishes between the check and the write.
            DbError::MissingReference(_) => Self::NotFound("referenced record"),
            other => Self::Storage(other),
        }
    }
}

//! Error types for stellaris.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using stellaris's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stellaris operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Query matched nothing locally or in the external catalog.
    #[error("Target not found: {query}")]
    StarNotFound { query: String },

    /// The external catalog could not be reached or answered with a failure.
    #[error("Star catalog unavailable: {0}")]
    LookupUnavailable(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The (user, name) uniqueness constraint rejected an insert.
    ///
    /// Raised by `insert_if_absent`. Never surfaced to callers; the
    /// reconciler re-reads the existing row.
    #[error("Discovery conflict for {user_id}/{name}, retried")]
    ConflictRetried { user_id: Uuid, name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed user identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a [`Error::StarNotFound`] carrying the attempted query.
    pub fn star_not_found(query: impl Into<String>) -> Self {
        Error::StarNotFound {
            query: query.into(),
        }
    }

    /// Whether this error is a unique-constraint violation reported by the database.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            Error::ConflictRetried { .. } => true,
            _ => false,
        }
    }
}

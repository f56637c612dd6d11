//! # Store Error Types
//!
//! Persistence failures. These are the I/O kind of the storefront error
//! taxonomy: the engine propagates them unchanged and never retries
//! internally; retry policy belongs to the presentation layer.

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the database or acquiring a connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A query could not be executed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A persisted document could not be decoded, or an outgoing entity
    /// could not be encoded.
    #[error("Invalid document in {collection}: {reason}")]
    InvalidDocument {
        collection: &'static str,
        reason: String,
    },

    /// A document is missing its `id` key and cannot be stored.
    #[error("Document in {collection} has no id")]
    MissingId { collection: &'static str },

    /// Anything else.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates an InvalidDocument error.
    pub fn invalid_document(collection: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidDocument {
            collection,
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

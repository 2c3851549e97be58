//! # Storage Errors
//!
//! Error types for the storage module.

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
///
/// The display text is surfaced verbatim to HTTP clients on 500 responses.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened
    #[error("{0}")]
    Open(rusqlite::Error),

    /// A statement failed to prepare or execute
    #[error("{0}")]
    Query(#[from] rusqlite::Error),

    /// The blocking worker running the statement did not complete
    #[error("storage task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_message_is_raw_sqlite_text() {
        let err = StorageError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(
            err.to_string(),
            rusqlite::Error::InvalidQuery.to_string()
        );
    }

    #[test]
    fn test_task_error_message() {
        let err = StorageError::Task("cancelled".to_string());
        assert_eq!(err.to_string(), "storage task failed: cancelled");
    }
}

//! Storage layer error types.

use thiserror::Error;

use timeline_types::TimelineError;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Draft rejected before reaching storage
    #[error("Validation error: {0}")]
    Validation(String),

    /// The data service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<TimelineError> for StoreError {
    fn from(err: TimelineError) -> Self {
        match err {
            TimelineError::InvalidInput(msg) => StoreError::Validation(msg),
            TimelineError::NotFound(msg) => StoreError::NotFound(msg),
            TimelineError::Serialization(e) => StoreError::Serialization(e.to_string()),
            TimelineError::Config(msg) => StoreError::Validation(msg),
        }
    }
}

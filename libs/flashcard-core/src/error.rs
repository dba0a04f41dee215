//! Error types for flashcard-core.

use crate::types::CardId;
use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised by scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid grade {0}: expected a value from 1 to 4")]
    InvalidGrade(u8),

    #[error("card not found: {0}")]
    CardNotFound(CardId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure reported by a persistence collaborator.
#[derive(Debug, Error)]
#[error("storage failure: {message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying backend error.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while reading generated card content.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty content")]
    Empty,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card {index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("card {index}: difficulty {value} is outside 1-5")]
    InvalidDifficulty { index: usize, value: u8 },

    #[error("response has no text candidate")]
    MissingCandidate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn storage_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let error = StorageError::with_source("write snapshot", io);
        assert_eq!(error.to_string(), "storage failure: write snapshot");
        assert_eq!(error.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn scheduler_error_display() {
        assert_eq!(
            SchedulerError::InvalidGrade(7).to_string(),
            "invalid grade 7: expected a value from 1 to 4"
        );
        assert_eq!(
            SchedulerError::CardNotFound(CardId::from("abc")).to_string(),
            "card not found: abc"
        );
    }
}

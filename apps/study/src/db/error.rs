//! Database error types.

use flashcard_core::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data in {column}: {value}")]
    InvalidData { column: &'static str, value: String },
}

impl From<DbError> for StorageError {
    fn from(e: DbError) -> Self {
        StorageError::with_source("sqlite store", e)
    }
}

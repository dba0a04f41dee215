//! Operations exposed to the chat UI.

pub mod cards;
pub mod stats;
pub mod study;

pub use cards::{import_generated, import_generated_response, ImportResult};
pub use stats::get_stats;
pub use study::{get_card, get_study_queue, next_card, submit_review, ReviewRequest, ReviewResponse, StudyQueue};

use flashcard_core::{ParseError, SchedulerError};

/// Error category the UI can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Parse,
    Internal,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CommandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<SchedulerError> for CommandError {
    fn from(e: SchedulerError) -> Self {
        let kind = match &e {
            SchedulerError::InvalidGrade(_) => ErrorKind::Validation,
            SchedulerError::CardNotFound(_) => ErrorKind::NotFound,
            SchedulerError::Storage(_) => ErrorKind::Storage,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        Self::new(ErrorKind::Parse, e.to_string())
    }
}

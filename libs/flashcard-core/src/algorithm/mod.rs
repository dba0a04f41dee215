//! Spaced repetition algorithm implementations.

pub mod sm2;

use crate::types::{Grade, ReviewState};
use chrono::{DateTime, Utc};

/// Result of scheduling a card after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: ReviewState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate next review state after a review.
    fn schedule(&self, state: &ReviewState, grade: Grade, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a card created at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> ReviewState;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

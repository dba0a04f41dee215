//! Review session commands.

use super::{CommandError, ErrorKind};
use crate::state::AppState;
use flashcard_core::types::{CardId, Flashcard, Stats};
use tracing::{debug, warn};

#[derive(Debug, serde::Deserialize)]
pub struct ReviewRequest {
    pub card_id: CardId,
    /// 1 = again, 2 = hard, 3 = good, 4 = easy.
    pub grade: u8,
}

#[derive(Debug, serde::Serialize)]
pub struct ReviewResponse {
    pub card: Flashcard,
    pub next_due: String,
    pub stats: Stats,
}

/// Cards due right now, in the order they should be shown.
#[derive(Debug, serde::Serialize)]
pub struct StudyQueue {
    pub card_ids: Vec<CardId>,
    pub due_count: usize,
}

/// Get the current due queue.
pub fn get_study_queue(state: &AppState) -> Result<StudyQueue, CommandError> {
    let scheduler = state.scheduler()?;
    let card_ids = scheduler.due_queue();
    debug!(due = card_ids.len(), total = scheduler.len(), "computed study queue");

    Ok(StudyQueue {
        due_count: card_ids.len(),
        card_ids,
    })
}

/// The card to show next, if anything is due.
pub fn next_card(state: &AppState) -> Result<Option<Flashcard>, CommandError> {
    let scheduler = state.scheduler()?;
    Ok(scheduler.next_card().cloned())
}

/// Submit a review grade for a card.
pub fn submit_review(request: ReviewRequest, state: &AppState) -> Result<ReviewResponse, CommandError> {
    let mut scheduler = state.scheduler()?;

    let card = scheduler
        .grade_review(&request.card_id, request.grade)
        .map_err(|e| {
            let error = CommandError::from(e);
            if error.kind == ErrorKind::Storage {
                warn!(card_id = %request.card_id, error = %error, "review applied but not persisted");
            }
            error
        })?;

    debug!(
        card_id = %card.id,
        grade = request.grade,
        interval = card.review.interval,
        repetitions = card.review.repetitions,
        status = card.status().as_str(),
        "review recorded"
    );

    Ok(ReviewResponse {
        next_due: card.review.next_review.to_rfc3339(),
        stats: scheduler.stats(),
        card,
    })
}

/// Get a single card by id.
pub fn get_card(card_id: &CardId, state: &AppState) -> Result<Flashcard, CommandError> {
    let scheduler = state.scheduler()?;
    scheduler
        .get_card(card_id)
        .cloned()
        .ok_or_else(|| CommandError::new(ErrorKind::NotFound, format!("card not found: {card_id}")))
}

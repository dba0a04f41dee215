//! Due-card selection.

use crate::types::{CardId, CardStatus, Flashcard};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Ids of every card due at `now`, in review order.
///
/// New cards come first whatever their `next_review`; within each group
/// cards are ordered by `next_review`, oldest first. Equal timestamps fall
/// back to id order so the output depends only on the collection and `now`.
pub fn due_queue<'a>(cards: impl IntoIterator<Item = &'a Flashcard>, now: DateTime<Utc>) -> Vec<CardId> {
    let mut due: Vec<&Flashcard> = cards.into_iter().filter(|c| c.is_due(now)).collect();
    due.sort_by(|a, b| review_order(a, b));
    due.into_iter().map(|c| c.id.clone()).collect()
}

fn review_order(a: &Flashcard, b: &Flashcard) -> Ordering {
    let a_new = a.status() == CardStatus::New;
    let b_new = b.status() == CardStatus::New;
    b_new
        .cmp(&a_new)
        .then_with(|| a.review.next_review.cmp(&b.review.next_review))
        .then_with(|| a.id.cmp(&b.id))
}

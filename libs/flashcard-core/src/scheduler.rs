//! The card collection and the operations that mutate it.

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::clock::Clock;
use crate::error::{Result, SchedulerError};
use crate::queue::due_queue;
use crate::store::{CardStore, StoredCollection};
use crate::types::{CardId, CardStatus, Flashcard, Grade, NewCard, Stats};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Owns the flashcards, decides what is due, and applies review grades.
///
/// Every mutation is applied in memory first and then handed to the store.
/// If the store fails, the error is returned but the in-memory update stays;
/// [`Scheduler::flush`] retries the write.
pub struct Scheduler<S, C> {
    cards: HashMap<CardId, Flashcard>,
    last_review: Option<DateTime<Utc>>,
    store: S,
    clock: C,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
}

impl<S: CardStore, C: Clock> Scheduler<S, C> {
    /// Load the stored collection and schedule with SM-2.
    pub fn open(store: S, clock: C) -> Result<Self> {
        Self::open_with(store, clock, Box::new(Sm2::default()))
    }

    pub fn open_with(
        mut store: S,
        clock: C,
        algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    ) -> Result<Self> {
        let stored = store.load()?;
        let cards = stored
            .cards
            .into_iter()
            .map(|mut card| {
                // Status is derived, never taken from storage.
                let review = &mut card.review;
                review.status = CardStatus::derive(review.repetitions, review.interval);
                (card.id.clone(), card)
            })
            .collect();

        Ok(Self {
            cards,
            last_review: stored.last_review,
            store,
            clock,
            algorithm,
        })
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Add a card built from generated content. It is due immediately.
    pub fn create_card(&mut self, content: NewCard) -> Result<CardId> {
        let id = self.insert(content);
        self.persist()?;
        Ok(id)
    }

    /// Add a batch of cards with a single write. Ids follow input order.
    pub fn create_cards(&mut self, contents: impl IntoIterator<Item = NewCard>) -> Result<Vec<CardId>> {
        let ids: Vec<CardId> = contents.into_iter().map(|c| self.insert(c)).collect();
        if !ids.is_empty() {
            self.persist()?;
        }
        Ok(ids)
    }

    /// Apply a 1-4 grade to a card and persist the collection.
    ///
    /// Out-of-range grades and unknown ids are rejected before anything is
    /// touched.
    pub fn grade_review(&mut self, id: &CardId, grade: u8) -> Result<Flashcard> {
        let grade = Grade::from_value(grade).ok_or(SchedulerError::InvalidGrade(grade))?;
        let now = self.clock.now();

        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| SchedulerError::CardNotFound(id.clone()))?;
        let result = self.algorithm.schedule(&card.review, grade, now);
        card.review = result.new_state;
        let updated = card.clone();

        self.last_review = Some(now);
        self.persist()?;
        Ok(updated)
    }

    /// Ids of due cards in review order.
    pub fn due_queue(&self) -> Vec<CardId> {
        due_queue(self.cards.values(), self.clock.now())
    }

    /// The card a review session should show next.
    pub fn next_card(&self) -> Option<&Flashcard> {
        self.due_queue().first().and_then(|id| self.cards.get(id))
    }

    pub fn due_count(&self) -> usize {
        let now = self.clock.now();
        self.cards.values().filter(|c| c.is_due(now)).count()
    }

    pub fn stats(&self) -> Stats {
        Stats::from_cards(self.cards.values())
    }

    pub fn get_card(&self, id: &CardId) -> Option<&Flashcard> {
        self.cards.get(id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// When the most recent grade was applied.
    pub fn last_review(&self) -> Option<DateTime<Utc>> {
        self.last_review
    }

    /// Write the current collection to the store again.
    pub fn flush(&mut self) -> Result<()> {
        self.persist()
    }

    fn insert(&mut self, content: NewCard) -> CardId {
        let mut id = CardId::generate();
        while self.cards.contains_key(&id) {
            id = CardId::generate();
        }

        let now = self.clock.now();
        let card = Flashcard::from_content(id.clone(), content, now, self.algorithm.initial_state(now));
        self.cards.insert(id.clone(), card);
        id
    }

    fn persist(&mut self) -> Result<()> {
        let mut cards: Vec<Flashcard> = self.cards.values().cloned().collect();
        cards.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));

        let collection = StoredCollection {
            stats: Stats::from_cards(&cards),
            cards,
            last_review: self.last_review,
        };
        self.store.save(&collection)?;
        Ok(())
    }
}

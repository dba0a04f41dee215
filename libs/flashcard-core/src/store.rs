//! Persistence contract for the card collection.
//!
//! The scheduler never does I/O itself. It hands the full collection to a
//! [`CardStore`] after each mutation and asks for it back once on startup.
//! Stores are last-write-wins and need no transactional guarantees.

use crate::error::StorageError;
use crate::types::{Flashcard, Stats};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Everything a store persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCollection {
    pub cards: Vec<Flashcard>,
    pub stats: Stats,
    pub last_review: Option<DateTime<Utc>>,
}

/// Durable home for the card collection.
pub trait CardStore: Send {
    /// Previously stored collection, or an empty one on first run.
    fn load(&mut self) -> Result<StoredCollection, StorageError>;

    /// Replace whatever was stored before.
    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError>;
}

impl<S: CardStore + ?Sized> CardStore for Box<S> {
    fn load(&mut self) -> Result<StoredCollection, StorageError> {
        (**self).load()
    }

    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError> {
        (**self).save(collection)
    }
}

/// In-process store. Clones share the same contents, so a test can keep a
/// handle while the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    saved: Option<StoredCollection>,
    saves: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `collection`.
    pub fn with_collection(collection: StoredCollection) -> Self {
        let store = Self::default();
        store.lock().saved = Some(collection);
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Last successfully saved collection.
    pub fn snapshot(&self) -> Option<StoredCollection> {
        self.lock().saved.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CardStore for MemoryStore {
    fn load(&mut self) -> Result<StoredCollection, StorageError> {
        Ok(self.lock().saved.clone().unwrap_or_default())
    }

    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StorageError::new("memory store rejected write"));
        }
        inner.saved = Some(collection.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_empty_collection() {
        let mut store = MemoryStore::new();
        let loaded = store.load().unwrap();
        assert!(loaded.cards.is_empty());
        assert_eq!(loaded.stats, Stats::default());
        assert!(loaded.last_review.is_none());
    }

    #[test]
    fn failing_store_keeps_previous_snapshot() {
        let mut store = MemoryStore::new();
        let first = StoredCollection {
            stats: Stats { learned: 1, ..Stats::default() },
            ..StoredCollection::default()
        };
        store.save(&first).unwrap();

        store.fail_writes(true);
        assert!(store.save(&StoredCollection::default()).is_err());
        assert_eq!(store.snapshot(), Some(first));
        assert_eq!(store.save_count(), 1);
    }
}

//! Single-file JSON store.
//!
//! Mirrors the record the browser client kept in local storage:
//! `{"cards": [[id, card], ...], "stats": {...}, "lastReview": "..."}`.

use chrono::{DateTime, Utc};
use flashcard_core::store::{CardStore, StoredCollection};
use flashcard_core::types::{CardId, Flashcard, Stats};
use flashcard_core::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    cards: Vec<(CardId, Flashcard)>,
    #[serde(default)]
    stats: Stats,
    #[serde(default)]
    last_review: Option<DateTime<Utc>>,
}

/// Card collection stored as one JSON document on disk.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CardStore for JsonSnapshotStore {
    fn load(&mut self) -> Result<StoredCollection, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredCollection::default()),
            Err(e) => return Err(StorageError::with_source("read snapshot", e)),
        };

        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| StorageError::with_source("decode snapshot", e))?;

        Ok(StoredCollection {
            cards: snapshot.cards.into_iter().map(|(_, card)| card).collect(),
            stats: snapshot.stats,
            last_review: snapshot.last_review,
        })
    }

    fn save(&mut self, collection: &StoredCollection) -> Result<(), StorageError> {
        let snapshot = Snapshot {
            cards: collection
                .cards
                .iter()
                .map(|card| (card.id.clone(), card.clone()))
                .collect(),
            stats: collection.stats,
            last_review: collection.last_review,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StorageError::with_source("encode snapshot", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::with_source("create snapshot directory", e))?;
            }
        }

        // The target is only ever replaced by a complete file.
        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| StorageError::with_source("write snapshot", e))?;
        fs::rename(&temp, &self.path)
            .map_err(|e| StorageError::with_source("replace snapshot", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use flashcard_core::types::{CardStatus, CardType, ReviewState};
    use pretty_assertions::assert_eq;

    fn sample_card(id: &str) -> Flashcard {
        let at = Utc.with_ymd_and_hms(2024, 7, 4, 16, 45, 0).unwrap();
        Flashcard {
            id: CardId::from(id),
            front: "la fiesta".into(),
            back: "the party".into(),
            examples: vec!["Vamos a la fiesta.".into()],
            notes: String::new(),
            card_type: CardType::Culture,
            difficulty: 3,
            created: at,
            review: ReviewState {
                last_reviewed: None,
                next_review: at,
                interval: 0,
                ease_factor: 2.5,
                repetitions: 0,
                status: CardStatus::New,
            },
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("flashcards.json"));
        assert_eq!(store.load().unwrap(), StoredCollection::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("nested").join("flashcards.json"));
        let cards = vec![sample_card("k1"), sample_card("k2")];
        let collection = StoredCollection {
            stats: Stats::from_cards(&cards),
            last_review: Some(Utc.with_ymd_and_hms(2024, 7, 5, 9, 0, 0).unwrap()),
            cards,
        };

        store.save(&collection).unwrap();
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), collection);
    }

    #[test]
    fn writes_browser_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path().join("flashcards.json"));
        let collection = StoredCollection {
            cards: vec![sample_card("k1")],
            stats: Stats { learned: 1, reviewing: 0, mastered: 0 },
            last_review: None,
        };
        store.save(&collection).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["cards"][0][0], "k1");
        assert_eq!(raw["cards"][0][1]["front"], "la fiesta");
        assert_eq!(raw["stats"]["learned"], 1);
        assert!(raw["lastReview"].is_null());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.json");
        fs::write(&path, "{not json").unwrap();
        let mut store = JsonSnapshotStore::new(path);
        let err = store.load().unwrap_err();
        assert_eq!(err.message(), "decode snapshot");
    }
}

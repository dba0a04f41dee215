//! SQLite-backed card store.

use crate::db::error::DbError;
use chrono::{DateTime, Utc};
use flashcard_core::store::{CardStore, StoredCollection};
use flashcard_core::types::{CardId, CardStatus, CardType, Flashcard, ReviewState, Stats};
use flashcard_core::StorageError;
use rusqlite::{params, Connection};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Card collection kept in a local SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_STATS)?;
        self.conn
            .pragma_update(None, "user_version", super::schema::SCHEMA_VERSION)?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        let version = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    fn load_collection(&self) -> Result<StoredCollection> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, examples, notes, card_type, difficulty, created,
                    last_reviewed, next_review, interval_days, ease_factor, repetitions, status
             FROM flashcards
             ORDER BY created, id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CardRow {
                    id: row.get(0)?,
                    front: row.get(1)?,
                    back: row.get(2)?,
                    examples: row.get(3)?,
                    notes: row.get(4)?,
                    card_type: row.get(5)?,
                    difficulty: row.get(6)?,
                    created: row.get(7)?,
                    last_reviewed: row.get(8)?,
                    next_review: row.get(9)?,
                    interval: row.get(10)?,
                    ease_factor: row.get(11)?,
                    repetitions: row.get(12)?,
                    status: row.get(13)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let cards = rows
            .into_iter()
            .map(CardRow::into_card)
            .collect::<Result<Vec<_>>>()?;

        let (learned, reviewing, mastered, last_review): (i64, i64, i64, Option<String>) =
            self.conn.query_row(
                "SELECT learned, reviewing, mastered, last_review FROM flashcard_stats WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;

        Ok(StoredCollection {
            cards,
            stats: Stats {
                learned: count("learned", learned)?,
                reviewing: count("reviewing", reviewing)?,
                mastered: count("mastered", mastered)?,
            },
            last_review: last_review
                .map(|s| parse_timestamp("last_review", s))
                .transpose()?,
        })
    }

    fn save_collection(&mut self, collection: &StoredCollection) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM flashcards", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO flashcards (id, front, back, examples, notes, card_type, difficulty, created,
                    last_reviewed, next_review, interval_days, ease_factor, repetitions, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for card in &collection.cards {
                let examples = serde_json::to_string(&card.examples)?;
                insert.execute(params![
                    card.id.as_str(),
                    card.front,
                    card.back,
                    examples,
                    card.notes,
                    card.card_type.as_str(),
                    card.difficulty,
                    card.created.to_rfc3339(),
                    card.review.last_reviewed.map(|d| d.to_rfc3339()),
                    card.review.next_review.to_rfc3339(),
                    card.review.interval,
                    card.review.ease_factor,
                    card.review.repetitions,
                    card.review.status.as_str(),
                ])?;
            }
        }
        tx.execute(
            "UPDATE flashcard_stats SET learned = ?1, reviewing = ?2, mastered = ?3, last_review = ?4 WHERE id = 1",
            params![
                collection.stats.learned as i64,
                collection.stats.reviewing as i64,
                collection.stats.mastered as i64,
                collection.last_review.map(|d| d.to_rfc3339()),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl CardStore for SqliteStore {
    fn load(&mut self) -> std::result::Result<StoredCollection, StorageError> {
        self.load_collection().map_err(Into::into)
    }

    fn save(&mut self, collection: &StoredCollection) -> std::result::Result<(), StorageError> {
        self.save_collection(collection).map_err(Into::into)
    }
}

/// Raw column values before validation.
struct CardRow {
    id: String,
    front: String,
    back: String,
    examples: String,
    notes: String,
    card_type: String,
    difficulty: u8,
    created: String,
    last_reviewed: Option<String>,
    next_review: String,
    interval: u32,
    ease_factor: f64,
    repetitions: u32,
    status: String,
}

impl CardRow {
    fn into_card(self) -> Result<Flashcard> {
        let card_type = CardType::from_str(&self.card_type).ok_or_else(|| DbError::InvalidData {
            column: "card_type",
            value: self.card_type.clone(),
        })?;
        let status = CardStatus::from_str(&self.status).ok_or_else(|| DbError::InvalidData {
            column: "status",
            value: self.status.clone(),
        })?;

        Ok(Flashcard {
            id: CardId::new(self.id),
            front: self.front,
            back: self.back,
            examples: serde_json::from_str(&self.examples)?,
            notes: self.notes,
            card_type,
            difficulty: self.difficulty,
            created: parse_timestamp("created", self.created)?,
            review: ReviewState {
                last_reviewed: self
                    .last_reviewed
                    .map(|s| parse_timestamp("last_reviewed", s))
                    .transpose()?,
                next_review: parse_timestamp("next_review", self.next_review)?,
                interval: self.interval,
                ease_factor: self.ease_factor,
                repetitions: self.repetitions,
                status,
            },
        })
    }
}

fn parse_timestamp(column: &'static str, value: String) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => Err(DbError::InvalidData { column, value }),
    }
}

fn count(column: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| DbError::InvalidData {
        column,
        value: value.to_string(),
    })
}

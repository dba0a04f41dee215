//! Flashcard scheduling core for the language-learning client.
//!
//! Provides:
//! - SM-2 spaced repetition scheduling
//! - The card collection with due-queue selection and stats
//! - Parser for generated card content
//! - Persistence and clock abstractions for the host to implement

pub mod algorithm;
pub mod clock;
pub mod error;
pub mod parser;
pub mod queue;
pub mod scheduler;
pub mod store;
pub mod types;

pub use algorithm::{get_algorithm, SchedulingResult, SpacedRepetitionAlgorithm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ParseError, Result, SchedulerError, StorageError};
pub use parser::{extract_response_text, parse_cards};
pub use queue::due_queue;
pub use scheduler::Scheduler;
pub use store::{CardStore, MemoryStore, StoredCollection};
pub use types::{CardId, CardStatus, CardType, Flashcard, Grade, NewCard, ReviewState, Stats};

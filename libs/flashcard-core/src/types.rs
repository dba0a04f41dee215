//! Core types for the flashcard scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repetitions needed before a card can count as mastered.
pub const MASTERED_REPETITIONS: u32 = 5;

/// Interval (days) needed before a card can count as mastered.
pub const MASTERED_INTERVAL_DAYS: u32 = 30;

/// Opaque card identifier, stable for the card's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Card learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Mastered,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl CardStatus {
    /// Status implied by a card's progress. Never stored independently of
    /// the two fields it is derived from.
    pub fn derive(repetitions: u32, interval_days: u32) -> Self {
        if repetitions >= MASTERED_REPETITIONS && interval_days >= MASTERED_INTERVAL_DAYS {
            Self::Mastered
        } else if repetitions > 0 {
            Self::Learning
        } else {
            Self::New
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Mastered => "mastered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "learning" => Some(Self::Learning),
            "mastered" => Some(Self::Mastered),
            _ => None,
        }
    }
}

/// Content category. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Vocabulary,
    Grammar,
    Culture,
    Usage,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
            Self::Culture => "culture",
            Self::Usage => "usage",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vocabulary" => Some(Self::Vocabulary),
            "grammar" => Some(Self::Grammar),
            "culture" => Some(Self::Culture),
            "usage" => Some(Self::Usage),
            _ => None,
        }
    }
}

/// Review grade given after seeing the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Grades of 3 and above count as successful recall.
    pub fn is_success(self) -> bool {
        self.to_value() >= 3
    }
}

/// Card content as supplied by the content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    pub back: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub difficulty: u8,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Per-card scheduling fields touched by a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: DateTime<Utc>,
    pub interval: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub status: CardStatus,
}

/// A learnable fact plus its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub difficulty: u8,
    pub created: DateTime<Utc>,
    #[serde(flatten)]
    pub review: ReviewState,
}

impl Flashcard {
    /// Build a card from generated content with the given initial state.
    pub fn from_content(id: CardId, content: NewCard, created: DateTime<Utc>, review: ReviewState) -> Self {
        Self {
            id,
            front: content.front,
            back: content.back,
            examples: content.examples,
            notes: content.notes,
            card_type: content.card_type,
            difficulty: content.difficulty,
            created,
            review,
        }
    }

    pub fn status(&self) -> CardStatus {
        self.review.status
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.review.next_review <= now
    }
}

/// Aggregate counts derived from the card collection.
///
/// `learned` counts cards whose status is `new`; display code relies on
/// that mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub learned: usize,
    pub reviewing: usize,
    pub mastered: usize,
}

impl Stats {
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a Flashcard>) -> Self {
        let mut stats = Self::default();
        for card in cards {
            match card.status() {
                CardStatus::Mastered => stats.mastered += 1,
                CardStatus::Learning => stats.reviewing += 1,
                CardStatus::New => stats.learned += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.learned + self.reviewing + self.mastered
    }
}

//! SQLite schema definitions.

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local card database.
pub const SCHEMA: &str = r#"
-- Cards with their scheduling state
CREATE TABLE IF NOT EXISTS flashcards (
    id TEXT PRIMARY KEY,
    front TEXT NOT NULL,
    back TEXT NOT NULL,
    examples TEXT NOT NULL DEFAULT '[]',
    notes TEXT NOT NULL DEFAULT '',
    card_type TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    created TEXT NOT NULL,
    last_reviewed TEXT,
    next_review TEXT NOT NULL,
    interval_days INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    repetitions INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'new'
);

CREATE INDEX IF NOT EXISTS idx_flashcards_next_review ON flashcards(next_review);

-- Aggregate counts, rewritten with every save
CREATE TABLE IF NOT EXISTS flashcard_stats (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    learned INTEGER NOT NULL DEFAULT 0,
    reviewing INTEGER NOT NULL DEFAULT 0,
    mastered INTEGER NOT NULL DEFAULT 0,
    last_review TEXT
);
"#;

/// Seed the single stats row.
pub const INIT_STATS: &str = "INSERT OR IGNORE INTO flashcard_stats (id) VALUES (1);";

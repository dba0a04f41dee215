pub mod commands;
pub mod config;
pub mod db;
pub mod snapshot;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use flashcard_core::{get_algorithm, CardStore, Clock, Scheduler, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreBackend};
use crate::db::SqliteStore;
use crate::snapshot::JsonSnapshotStore;
use crate::state::AppState;

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Open the store the configuration points at.
pub fn open_store(config: &Config) -> anyhow::Result<Box<dyn CardStore>> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data directory {}", config.data_dir.display()))?;

    let path = config.store_path();
    let store: Box<dyn CardStore> = match config.store {
        StoreBackend::Sqlite => Box::new(
            SqliteStore::open(&path)
                .with_context(|| format!("opening database {}", path.display()))?,
        ),
        StoreBackend::Json => Box::new(JsonSnapshotStore::new(path)),
    };
    Ok(store)
}

/// Build application state with an explicit clock.
pub fn open_app_with_clock(config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<AppState> {
    let store = open_store(config)?;
    let algorithm = get_algorithm(&config.algorithm)
        .with_context(|| format!("unknown scheduling algorithm {}", config.algorithm))?;

    let scheduler = Scheduler::open_with(store, clock, algorithm).context("loading flashcards")?;
    tracing::info!(
        cards = scheduler.len(),
        due = scheduler.due_count(),
        store = ?config.store,
        algorithm = scheduler.algorithm_name(),
        "flashcards loaded"
    );

    Ok(AppState::new(scheduler))
}

/// Build application state on the wall clock.
pub fn open_app(config: &Config) -> anyhow::Result<AppState> {
    open_app_with_clock(config, Arc::new(SystemClock))
}

/// Read configuration, set up logging and open the card collection.
pub fn run() -> anyhow::Result<AppState> {
    let config = Config::from_env()?;
    init_tracing(&config.log_filter);

    tracing::info!("Opening flashcards in {}", config.data_dir.display());
    open_app(&config)
}

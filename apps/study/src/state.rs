//! Application state.

use crate::commands::CommandError;
use flashcard_core::{CardStore, Clock, Scheduler};
use std::sync::{Arc, Mutex, MutexGuard};

/// Scheduler as the host holds it: any store, any clock.
pub type AppScheduler = Scheduler<Box<dyn CardStore>, Arc<dyn Clock>>;

/// Global application state.
///
/// Every command takes the lock for its whole duration, so a review is
/// applied and persisted as one step.
pub struct AppState {
    pub scheduler: Arc<Mutex<AppScheduler>>,
}

impl AppState {
    pub fn new(scheduler: AppScheduler) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
        }
    }

    pub fn scheduler(&self) -> Result<MutexGuard<'_, AppScheduler>, CommandError> {
        self.scheduler
            .lock()
            .map_err(|_| CommandError::internal("scheduler lock poisoned"))
    }
}

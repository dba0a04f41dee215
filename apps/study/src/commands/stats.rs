//! Statistics commands.

use super::CommandError;
use crate::state::AppState;
use flashcard_core::types::Stats;

/// Get card counts by status.
pub fn get_stats(state: &AppState) -> Result<Stats, CommandError> {
    let scheduler = state.scheduler()?;
    Ok(scheduler.stats())
}

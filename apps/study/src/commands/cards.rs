//! Card import commands.

use super::CommandError;
use crate::state::AppState;
use flashcard_core::parser;
use flashcard_core::types::CardId;
use tracing::info;

#[derive(Debug, serde::Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub card_ids: Vec<CardId>,
}

/// Create cards from the model's card JSON.
///
/// Nothing is added if any card in the batch fails validation.
pub fn import_generated(content: &str, state: &AppState) -> Result<ImportResult, CommandError> {
    let cards = parser::parse_cards(content)?;

    let mut scheduler = state.scheduler()?;
    let card_ids = scheduler.create_cards(cards)?;
    info!(imported = card_ids.len(), total = scheduler.len(), "imported generated flashcards");

    Ok(ImportResult {
        imported: card_ids.len(),
        card_ids,
    })
}

/// Create cards from a full generate-content response body.
pub fn import_generated_response(body: &str, state: &AppState) -> Result<ImportResult, CommandError> {
    let text = parser::extract_response_text(body)?;
    import_generated(&text, state)
}

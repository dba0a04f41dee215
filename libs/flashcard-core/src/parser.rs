//! Parser for generated flashcard content.
//!
//! # Format
//! ```json
//! {
//!   "cards": [
//!     {
//!       "front": "el gato",
//!       "back": "the cat",
//!       "type": "vocabulary",
//!       "difficulty": 1,
//!       "examples": ["El gato duerme."],
//!       "notes": "Masculine noun."
//!     }
//!   ]
//! }
//! ```
//!
//! Models often wrap the object in a markdown code fence; the fence is
//! stripped before parsing.

use crate::error::ParseError;
use crate::types::NewCard;
use serde::Deserialize;

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Deserialize)]
struct CardBatch {
    cards: Vec<NewCard>,
}

/// Parse a generated card batch into validated card content.
pub fn parse_cards(content: &str) -> Result<Vec<NewCard>> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let batch: CardBatch = serde_json::from_str(body)?;
    let mut cards = Vec::with_capacity(batch.cards.len());
    for (index, card) in batch.cards.into_iter().enumerate() {
        cards.push(validate(index, card)?);
    }
    Ok(cards)
}

/// Pull the generated text out of a generate-content API response body.
///
/// Only the first text part of the first candidate is used.
pub fn extract_response_text(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    value["candidates"][0]["content"]["parts"]
        .as_array()
        .and_then(|parts| parts.iter().find_map(|p| p["text"].as_str()))
        .map(str::to_string)
        .ok_or(ParseError::MissingCandidate)
}

fn validate(index: usize, mut card: NewCard) -> Result<NewCard> {
    card.front = card.front.trim().to_string();
    card.back = card.back.trim().to_string();
    card.notes = card.notes.trim().to_string();

    if card.front.is_empty() {
        return Err(ParseError::EmptyField { index, field: "front" });
    }
    if card.back.is_empty() {
        return Err(ParseError::EmptyField { index, field: "back" });
    }
    if !(1..=5).contains(&card.difficulty) {
        return Err(ParseError::InvalidDifficulty {
            index,
            value: card.difficulty,
        });
    }

    card.examples.retain(|e| !e.trim().is_empty());
    Ok(card)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string ("json") on the opening line.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardType;

    const BATCH: &str = r#"{
        "cards": [
            {
                "front": "el gato",
                "back": "the cat",
                "type": "vocabulary",
                "difficulty": 1,
                "examples": ["El gato duerme.", "  "],
                "notes": "Masculine noun."
            },
            {
                "front": "ser vs estar",
                "back": "permanent vs temporary states",
                "type": "grammar",
                "difficulty": 4
            }
        ]
    }"#;

    #[test]
    fn parse_batch() {
        let cards = parse_cards(BATCH).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "el gato");
        assert_eq!(cards[0].card_type, CardType::Vocabulary);
        assert_eq!(cards[0].examples, vec!["El gato duerme.".to_string()]);
        assert_eq!(cards[1].card_type, CardType::Grammar);
        assert!(cards[1].examples.is_empty());
        assert_eq!(cards[1].notes, "");
    }

    #[test]
    fn parse_fenced_batch() {
        let fenced = format!("```json\n{BATCH}\n```");
        assert_eq!(parse_cards(&fenced).unwrap().len(), 2);
    }

    #[test]
    fn parse_empty_batch() {
        assert!(parse_cards(r#"{"cards": []}"#).unwrap().is_empty());
    }

    #[test]
    fn reject_empty_content() {
        assert!(matches!(parse_cards("  \n"), Err(ParseError::Empty)));
        assert!(matches!(parse_cards("```json\n```"), Err(ParseError::Empty)));
    }

    #[test]
    fn reject_malformed_json() {
        assert!(matches!(parse_cards("{\"cards\": ["), Err(ParseError::Json(_))));
    }

    #[test]
    fn reject_unknown_type() {
        let input = r#"{"cards":[{"front":"a","back":"b","type":"idiom","difficulty":1}]}"#;
        assert!(matches!(parse_cards(input), Err(ParseError::Json(_))));
    }

    #[test]
    fn reject_blank_front() {
        let input = r#"{"cards":[{"front":" ","back":"b","type":"usage","difficulty":1}]}"#;
        assert!(matches!(
            parse_cards(input),
            Err(ParseError::EmptyField { index: 0, field: "front" })
        ));
    }

    #[test]
    fn reject_difficulty_out_of_range() {
        let input = r#"{"cards":[
            {"front":"a","back":"b","type":"culture","difficulty":3},
            {"front":"c","back":"d","type":"culture","difficulty":6}
        ]}"#;
        assert!(matches!(
            parse_cards(input),
            Err(ParseError::InvalidDifficulty { index: 1, value: 6 })
        ));
    }

    #[test]
    fn extract_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"},{"text":"ignored"}]}}]}"#;
        assert_eq!(extract_response_text(body).unwrap(), "hello");
    }

    #[test]
    fn extract_without_candidates() {
        assert!(matches!(
            extract_response_text(r#"{"candidates":[]}"#),
            Err(ParseError::MissingCandidate)
        ));
    }
}

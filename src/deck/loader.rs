//! Load a deck from its JSON file

use std::collections::HashSet;
use std::path::Path;

use crate::core::error::{LensError, Result};
use crate::core::types::Lens;
use crate::deck::Deck;

/// Load the deck at `path`
///
/// The file is a JSON array of `{ id, principle, prompts, counter }`.
pub async fn load_deck(path: &Path) -> Result<Deck> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LensError::DeckLoad(format!("Failed to read deck {:?}: {}", path, e)))?;

    let deck = parse_deck(&contents)?;
    tracing::info!(path = %path.display(), lenses = deck.len(), "Loaded deck");
    Ok(deck)
}

/// Parse deck JSON, rejecting duplicate ids
pub fn parse_deck(contents: &str) -> Result<Deck> {
    let lenses: Vec<Lens> = serde_json::from_str(contents)
        .map_err(|e| LensError::DeckLoad(format!("Invalid deck JSON: {}", e)))?;

    let mut seen = HashSet::new();
    for lens in &lenses {
        if !seen.insert(&lens.id) {
            return Err(LensError::DeckLoad(format!("Duplicate lens id: {}", lens.id)));
        }
    }

    Ok(Deck::new(lenses))
}

//! Starter deck loader.

use std::path::Path;

use combat_core::{CardIntent, CardKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A card entry with a copy count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardIntent,
    #[serde(default = "default_copies")]
    pub copies: u32,
}

fn default_copies() -> u32 {
    1
}

/// Deck structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckList {
    pub cards: Vec<DeckEntry>,
}

/// Loader for starter decks from RON files.
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck and expand copy counts into a flat card list, in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<CardIntent>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse deck RON {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CardIntent>> {
        let list: DeckList = ron::from_str(content)?;

        let mut cards = Vec::new();
        for entry in list.cards {
            if let CardKind::Hex { effect } = &entry.card.kind {
                if effect.remaining_turns == 0 {
                    anyhow::bail!("card '{}' applies an effect with no duration", entry.card.name);
                }
            }
            for _ in 0..entry.copies {
                cards.push(entry.card.clone());
            }
        }
        if cards.is_empty() {
            anyhow::bail!("deck has no cards");
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_copies() {
        let cards = DeckLoader::parse(
            r#"(cards: [
                (card: (name: "Strike", cost: 1, kind: Strike(damage: 6)), copies: 3),
                (card: (name: "Guard", cost: 1, kind: Guard(amount: 5))),
                (card: (name: "Cleave", cost: 2, kind: Sweep(damage: 4), crit_chance: 10.0)),
            ])"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].name, "Strike");
        assert_eq!(cards[2].name, "Strike");
        assert_eq!(cards[3].kind, CardKind::Guard { amount: 5 });
        assert_eq!(cards[4].crit_chance, 10.0);
        assert_eq!(cards[4].delay_turns, 0);
    }

    #[test]
    fn rejects_empty_deck() {
        let err = DeckLoader::parse("(cards: [])").unwrap_err();
        assert!(err.to_string().contains("no cards"));
    }
}

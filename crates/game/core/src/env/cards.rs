//! Opaque card source.
//!
//! Deck building and card catalogs are outside the engine. It only asks for
//! the next `count` cards at draw points.

use crate::action::CardIntent;

pub trait CardSource: Send {
    /// Draws up to `count` cards. May return fewer when the source runs dry.
    fn draw(&mut self, count: usize) -> Vec<CardIntent>;
}

/// Endless deck that cycles through a fixed card list in order.
#[derive(Clone, Debug, Default)]
pub struct CyclingDeck {
    cards: Vec<CardIntent>,
    cursor: usize,
}

impl CyclingDeck {
    pub fn new(cards: Vec<CardIntent>) -> Self {
        Self { cards, cursor: 0 }
    }
}

impl CardSource for CyclingDeck {
    fn draw(&mut self, count: usize) -> Vec<CardIntent> {
        if self.cards.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let card = self.cards[self.cursor].clone();
                self.cursor = (self.cursor + 1) % self.cards.len();
                card
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_deck_wraps_around() {
        let mut deck = CyclingDeck::new(vec![
            CardIntent::strike("A", 1, 1),
            CardIntent::strike("B", 1, 1),
        ]);
        let names: Vec<_> = deck.draw(3).into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "B", "A"]);
    }

    #[test]
    fn empty_deck_draws_nothing() {
        let mut deck = CyclingDeck::default();
        assert!(deck.draw(4).is_empty());
    }
}

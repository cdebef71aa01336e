//! The local player's hand.

use serde::Serialize;
use wwwcats_protocol::Card;

/// Cards in the order of the most recent `hand` message.
///
/// Positions are the protocol's addresses for cards (`play 3`), and they
/// are only meaningful against the hand they were read from. Every `hand`
/// message replaces the whole sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn replace(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Copies of `card`, by exact identifier.
    pub fn count(&self, card: &Card) -> usize {
        self.cards.iter().filter(|c| *c == card).count()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

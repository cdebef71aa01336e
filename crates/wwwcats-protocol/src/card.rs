//! Card identifiers and the fixed card catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card types a player can hold, in the order the server sorts a hand.
///
/// This is also the choice set for a `steal_what` question: the thief names
/// a type without seeing the target's hand. `exploding` is absent because it
/// never stays in a hand.
pub const CATALOGUE: [&str; 12] = [
    "defuse", "nope", "skip", "attack", "see3", "shuffle", "favour",
    "random1", "random2", "random3", "random4", "random5",
];

/// What a card does, derived from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Defuse,
    /// The universal counter. Playable out of turn.
    Nope,
    Skip,
    Attack,
    See3,
    Shuffle,
    Favour,
    /// One of the five "undecided" cards. Only useful in combos.
    Random(u8),
    Exploding,
    /// An identifier this client does not know.
    Unknown,
}

/// A card identifier as it appears on the wire (`defuse`, `random3`, ...).
///
/// Kept as a string so that cards added on the server side still flow
/// through hands and logs; [`Card::kind`] classifies the ones we know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    /// Wraps a wire identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The wire identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the identifier.
    pub fn kind(&self) -> CardKind {
        match self.0.as_str() {
            "defuse" => CardKind::Defuse,
            "nope" => CardKind::Nope,
            "skip" => CardKind::Skip,
            "attack" => CardKind::Attack,
            "see3" => CardKind::See3,
            "shuffle" => CardKind::Shuffle,
            "favour" => CardKind::Favour,
            "exploding" => CardKind::Exploding,
            other => match other.strip_prefix("random") {
                Some(n @ ("1" | "2" | "3" | "4" | "5")) => {
                    CardKind::Random(n.as_bytes()[0] - b'0')
                }
                _ => CardKind::Unknown,
            },
        }
    }

    pub fn is_defuse(&self) -> bool {
        self.kind() == CardKind::Defuse
    }

    /// Returns `true` for the card that may be played outside our turn.
    pub fn is_counter(&self) -> bool {
        self.kind() == CardKind::Nope
    }

    /// Returns `true` for the undecided cards, which are never played alone.
    pub fn is_random(&self) -> bool {
        matches!(self.kind(), CardKind::Random(_))
    }

    /// Position in the server's sort order. Unknown cards sort last.
    pub fn sort_weight(&self) -> usize {
        CATALOGUE
            .iter()
            .position(|c| *c == self.0)
            .unwrap_or(CATALOGUE.len())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Card {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

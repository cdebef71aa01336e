//! Question kinds for the `q` / `a` sub-protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the server is asking for in a `q <kind> [arg]` message.
///
/// The kind token is echoed back verbatim in the answer (`a <kind>
/// <answer>`), so unknown kinds are kept as [`QuestionKind::Generic`] rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    /// Give a card to the asker. Answered by clicking a card in hand.
    FavourWhat,
    /// Pick a player to ask for a favour.
    FavourWho,
    /// Pick a player to take a random card from.
    RandomWho,
    /// Pick a player to steal from.
    StealWho,
    /// Name a card type to steal.
    StealWhat,
    /// Where to put the exploding card back into the draw pile.
    DefusePos,
    /// Anything else; answered with free text.
    Generic(String),
}

/// The shape an answer to a question must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    /// A position in the current hand.
    HandIndex,
    /// A player name other than our own.
    Player,
    /// A card type from [`crate::CATALOGUE`].
    CardType,
    /// A draw-pile position, `0..=cards_left`.
    Position,
    /// Any single word. The server splits answers on whitespace.
    FreeText,
}

impl QuestionKind {
    /// Parses a kind token. Never fails.
    pub fn from_token(token: &str) -> Self {
        match token {
            "favour_what" => Self::FavourWhat,
            "favour_who" => Self::FavourWho,
            "random_who" => Self::RandomWho,
            "steal_who" => Self::StealWho,
            "steal_what" => Self::StealWhat,
            "defuse_pos" => Self::DefusePos,
            other => Self::Generic(other.to_string()),
        }
    }

    /// The wire token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::FavourWhat => "favour_what",
            Self::FavourWho => "favour_who",
            Self::RandomWho => "random_who",
            Self::StealWho => "steal_who",
            Self::StealWhat => "steal_what",
            Self::DefusePos => "defuse_pos",
            Self::Generic(kind) => kind,
        }
    }

    pub fn answer_shape(&self) -> AnswerShape {
        match self {
            Self::FavourWhat => AnswerShape::HandIndex,
            Self::FavourWho | Self::RandomWho | Self::StealWho => {
                AnswerShape::Player
            }
            Self::StealWhat => AnswerShape::CardType,
            Self::DefusePos => AnswerShape::Position,
            Self::Generic(_) => AnswerShape::FreeText,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for QuestionKind {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_round_trip_through_tokens() {
        for token in [
            "favour_what",
            "favour_who",
            "random_who",
            "steal_who",
            "steal_what",
            "defuse_pos",
        ] {
            let kind = QuestionKind::from_token(token);
            assert!(!matches!(kind, QuestionKind::Generic(_)), "{token}");
            assert_eq!(kind.as_str(), token);
        }
    }

    #[test]
    fn test_unknown_kind_is_generic_and_echoed() {
        let kind = QuestionKind::from_token("pick_colour");
        assert_eq!(kind, QuestionKind::Generic("pick_colour".into()));
        assert_eq!(kind.to_string(), "pick_colour");
        assert_eq!(kind.answer_shape(), AnswerShape::FreeText);
    }

    #[test]
    fn test_answer_shapes() {
        assert_eq!(QuestionKind::FavourWhat.answer_shape(), AnswerShape::HandIndex);
        assert_eq!(QuestionKind::StealWho.answer_shape(), AnswerShape::Player);
        assert_eq!(QuestionKind::StealWhat.answer_shape(), AnswerShape::CardType);
        assert_eq!(QuestionKind::DefusePos.answer_shape(), AnswerShape::Position);
    }

    #[test]
    fn test_kind_serializes_as_wire_token() {
        let json = serde_json::to_string(&QuestionKind::RandomWho).unwrap();
        assert_eq!(json, "\"random_who\"");
        let back: QuestionKind = serde_json::from_str("\"steal_what\"").unwrap();
        assert_eq!(back, QuestionKind::StealWhat);
    }
}

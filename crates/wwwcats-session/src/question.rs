//! The pending-question sub-machine.
//!
//! ```text
//!            q <kind> [arg]
//!   None ─────────────────────→ Pending { kind, asker }
//!    ↑                                 │
//!    └──── answer sent / q_cancel ─────┘
//! ```
//!
//! `favour_what` is special: it is answered by the next card click, which
//! becomes `a favour_what <index>` instead of `play <index>`. Every other
//! kind is answered through [`Session::answer`](crate::Session::answer).

use serde::Serialize;
use wwwcats_protocol::{AnswerShape, CATALOGUE, QuestionKind};

/// A question the server is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingQuestion {
    pub kind: QuestionKind,
    /// Who asked, when the server says (`q favour_what alice`).
    pub asker: Option<String>,
}

/// The options to offer the user for the pending question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choices {
    /// Click a card in hand (`hand_size` positions).
    HandCard { hand_size: usize },
    /// One of these players.
    Players(Vec<String>),
    /// One of these card types.
    CardTypes(&'static [&'static str]),
    /// A draw-pile position up to `max` (unbounded if unknown).
    Position { max: Option<u32> },
    /// Any single word.
    FreeText,
}

impl Choices {
    /// Returns `true` if `answer` is one of the choices.
    pub fn accepts(&self, answer: &str) -> bool {
        match self {
            Self::HandCard { hand_size } => answer
                .parse::<usize>()
                .is_ok_and(|index| index < *hand_size),
            Self::Players(names) => names.iter().any(|n| n == answer),
            Self::CardTypes(types) => types.iter().any(|t| *t == answer),
            Self::Position { max } => answer
                .parse::<u32>()
                .is_ok_and(|pos| max.is_none_or(|max| pos <= max)),
            Self::FreeText => true,
        }
    }
}

/// Builds the choice set for `kind` from the current session view.
pub(crate) fn choices_for(
    kind: &QuestionKind,
    hand_size: usize,
    opponents: Vec<String>,
    cards_left: Option<u32>,
) -> Choices {
    match kind.answer_shape() {
        AnswerShape::HandIndex => Choices::HandCard { hand_size },
        AnswerShape::Player => Choices::Players(opponents),
        AnswerShape::CardType => Choices::CardTypes(&CATALOGUE),
        AnswerShape::Position => Choices::Position { max: cards_left },
        AnswerShape::FreeText => Choices::FreeText,
    }
}

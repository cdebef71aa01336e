//! Error types for the session layer.

use wwwcats_protocol::{Card, LocaleKey, ProtocolError, QuestionKind};

use crate::ConnectionPhase;

/// A local action that was refused before anything was sent.
///
/// None of these end the session. The user is told why, and the session
/// carries on exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The name or lobby would not survive the trip as a single token.
    #[error(transparent)]
    InvalidIdentity(#[from] ProtocolError),

    /// A join was requested while a session is already under way.
    #[error("already connecting")]
    AlreadyConnecting,

    /// A lifecycle step arrived in the wrong phase.
    #[error("expected phase {expected}, session is {actual}")]
    WrongPhase {
        expected: ConnectionPhase,
        actual: ConnectionPhase,
    },

    /// Game actions need an active session.
    #[error("not in a lobby yet (session is {0})")]
    NotActive(ConnectionPhase),

    /// The server has locked card play until an exchange completes.
    #[error("card play is locked until the current exchange finishes")]
    Locked,

    #[error("it is not your turn")]
    NotYourTurn,

    /// Only the defuse card can be played while defusing.
    #[error("you are defusing; only a defuse card can be played")]
    DefuseOnly,

    /// The card can never be played on its own.
    #[error("{0} can only be played as part of a combo")]
    NotPlayable(Card),

    /// The index does not address a card in the current hand.
    #[error("there is no card {index} in a hand of {len}")]
    OutOfRange { index: usize, len: usize },

    /// The combo selector is at 0 (deselected).
    #[error("no play selected")]
    ComboDeselected,

    /// Combo multipliers run from 0 to 3.
    #[error("combo must be between 0 and 3, got {0}")]
    InvalidCombo(u8),

    /// Not enough copies of the card for the selected combo.
    #[error("a {needed}-card combo needs {needed} copies of {card}, you hold {held}")]
    InsufficientCombo {
        card: Card,
        needed: u8,
        held: usize,
    },

    /// The server is waiting for an answer first.
    #[error("answer the pending {0} question first")]
    QuestionPending(QuestionKind),

    #[error("the draw pile is empty")]
    EmptyDrawPile,

    /// The answer does not fit the question.
    #[error("`{answer}` is not a valid answer to {kind}")]
    InvalidAnswer { kind: QuestionKind, answer: String },
}

impl SessionError {
    /// The string-table key for errors the host has localized text for.
    pub fn locale_key(&self) -> Option<LocaleKey> {
        match self {
            Self::InvalidIdentity(_) => Some(LocaleKey::error("one_word")),
            Self::AlreadyConnecting => {
                Some(LocaleKey::error("already_connecting"))
            }
            _ => None,
        }
    }
}

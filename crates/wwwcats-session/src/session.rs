//! Session types: the client's mirror of one lobby, from join to close.
//!
//! A [`Session`] is created when the user asks to join, filled in by inbound
//! messages, and thrown away when the connection ends. It is the only
//! mutable state in the client; every handler and every local action takes
//! it by `&mut` from the one task that owns it.

use std::fmt;

use serde::Serialize;
use wwwcats_protocol::{AnswerShape, Card, Command, QuestionKind, single_word};

use crate::gate::{self, Combo, GateFlags};
use crate::question::{self, Choices, PendingQuestion};
use crate::{Hand, Roster, SessionError};

// ---------------------------------------------------------------------------
// ConnectionPhase
// ---------------------------------------------------------------------------

/// Where the session is in its lifecycle.
///
/// ```text
/// Disconnected ──(join)──→ Connecting ──(open)──→ AwaitingJoinAck
///                                                       │
///                                              (joins <our name>)
///                                                       ▼
///          any ──(err / version mismatch / close)──→ Closed ←── Active
/// ```
///
/// `Closed` is terminal. A new game needs a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    AwaitingJoinAck,
    Active,
    Closed,
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::AwaitingJoinAck => write!(f, "AwaitingJoinAck"),
            Self::Active => write!(f, "Active"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Who we are and which lobby we asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    name: String,
    lobby: String,
}

impl Identity {
    /// # Errors
    /// Returns [`SessionError::InvalidIdentity`] if either value is empty or
    /// contains whitespace.
    pub fn new(lobby: &str, name: &str) -> Result<Self, SessionError> {
        Ok(Self {
            lobby: single_word(lobby)?.to_string(),
            name: single_word(name)?.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lobby(&self) -> &str {
        &self.lobby
    }
}

// ---------------------------------------------------------------------------
// TableView
// ---------------------------------------------------------------------------

/// Shared table state that does not affect what we may do, except for the
/// draw pile (no drawing from an empty pile).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub draw_pile: bool,
    pub cards_left: Option<u32>,
    pub discard: Option<Card>,
    /// Key (without the `message_` prefix) of the info panel, if shown.
    pub info_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One connection's worth of game state.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    phase: ConnectionPhase,
    pub roster: Roster,
    now_playing: Option<String>,
    pub hand: Hand,
    pub gate: GateFlags,
    combo: Combo,
    pending: Option<PendingQuestion>,
    pub table: TableView,
}

impl Session {
    /// A fresh, disconnected session for `identity`.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            phase: ConnectionPhase::Disconnected,
            roster: Roster::new(),
            now_playing: None,
            hand: Hand::default(),
            gate: GateFlags::default(),
            combo: Combo::default(),
            pending: None,
            table: TableView::default(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ConnectionPhase::Active
    }

    pub fn is_closed(&self) -> bool {
        self.phase == ConnectionPhase::Closed
    }

    // -- Lifecycle ---------------------------------------------------------

    /// `Disconnected → Connecting`.
    ///
    /// # Errors
    /// [`SessionError::AlreadyConnecting`] from any other phase.
    pub fn begin_connect(&mut self) -> Result<(), SessionError> {
        if self.phase != ConnectionPhase::Disconnected {
            return Err(SessionError::AlreadyConnecting);
        }
        self.phase = ConnectionPhase::Connecting;
        tracing::debug!(lobby = %self.identity.lobby, "connecting");
        Ok(())
    }

    /// `Connecting → AwaitingJoinAck`, returning the handshake to send.
    pub fn transport_ready(&mut self) -> Result<Command, SessionError> {
        if self.phase != ConnectionPhase::Connecting {
            return Err(SessionError::WrongPhase {
                expected: ConnectionPhase::Connecting,
                actual: self.phase,
            });
        }
        let join =
            Command::join_lobby(&self.identity.lobby, &self.identity.name)?;
        self.phase = ConnectionPhase::AwaitingJoinAck;
        Ok(join)
    }

    /// Handles `joins <our name>`.
    ///
    /// Returns `true` only on the transition into `Active`; a repeat while
    /// already active changes nothing.
    pub fn acknowledge_join(&mut self) -> bool {
        if self.phase != ConnectionPhase::AwaitingJoinAck {
            return false;
        }
        self.phase = ConnectionPhase::Active;
        tracing::info!(
            name = %self.identity.name,
            lobby = %self.identity.lobby,
            "joined lobby"
        );
        true
    }

    /// Moves to `Closed` and drops everything learned from the server.
    pub fn close(&mut self) {
        if self.phase == ConnectionPhase::Closed {
            return;
        }
        self.phase = ConnectionPhase::Closed;
        self.roster.clear();
        self.now_playing = None;
        self.hand.clear();
        self.gate = GateFlags::default();
        self.combo = Combo::default();
        self.pending = None;
        self.table = TableView::default();
        tracing::info!(name = %self.identity.name, "session closed");
    }

    /// # Errors
    /// [`SessionError::NotActive`] outside the `Active` phase.
    pub fn require_active(&self) -> Result<(), SessionError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(SessionError::NotActive(self.phase))
        }
    }

    // -- Turn --------------------------------------------------------------

    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }

    /// Always derived from `now_playing`, never stored.
    pub fn is_our_turn(&self) -> bool {
        self.now_playing.as_deref() == Some(self.identity.name.as_str())
    }

    /// Where the now-playing marker sits in the current player order.
    ///
    /// Resolved by name each time, since `players` may reorder the list or
    /// arrive after `now_playing`.
    pub fn now_playing_position(&self) -> Option<usize> {
        self.now_playing
            .as_deref()
            .and_then(|name| self.roster.position(name))
    }

    pub fn set_now_playing(&mut self, name: String) {
        self.now_playing = Some(name);
    }

    /// Clears the turn (the game has a winner).
    pub fn clear_turn(&mut self) {
        self.now_playing = None;
    }

    // -- Combo -------------------------------------------------------------

    pub fn combo(&self) -> Combo {
        self.combo
    }

    pub fn select_combo(&mut self, multiplier: u8) -> Result<Combo, SessionError> {
        self.combo = Combo::new(multiplier)?;
        Ok(self.combo)
    }

    // -- Questions ---------------------------------------------------------

    pub fn pending_question(&self) -> Option<&PendingQuestion> {
        self.pending.as_ref()
    }

    /// Enters the pending state for a `q` message.
    ///
    /// The server is authoritative: a question that arrives while another is
    /// pending replaces it. The replaced question is returned.
    pub fn ask(
        &mut self,
        kind: QuestionKind,
        asker: Option<String>,
    ) -> Option<PendingQuestion> {
        let previous = self.pending.replace(PendingQuestion { kind, asker });
        if let Some(prev) = &previous {
            tracing::warn!(kind = %prev.kind, "question replaced before it was answered");
        }
        previous
    }

    /// Drops the pending question without answering (`q_cancel`).
    pub fn cancel_question(&mut self) -> Option<PendingQuestion> {
        self.pending.take()
    }

    /// The choice set for the pending question.
    pub fn choices(&self) -> Option<Choices> {
        self.pending.as_ref().map(|p| self.choices_for(&p.kind))
    }

    fn choices_for(&self, kind: &QuestionKind) -> Choices {
        question::choices_for(
            kind,
            self.hand.len(),
            self.roster.opponents(&self.identity.name),
            self.table.cards_left,
        )
    }

    /// Answers the pending question.
    ///
    /// Returns `Ok(None)` when nothing is pending: a stray answer is not an
    /// error, it just does nothing.
    ///
    /// Answers are one word: the server reads only the first field after
    /// the question kind, so free-text answers cannot contain spaces.
    ///
    /// # Errors
    /// [`SessionError::InvalidAnswer`] if `answer` is not among the choices.
    /// [`SessionError::Locked`] for a hand-card answer while play is locked,
    /// the same rule a card click follows. Either way the question stays
    /// pending.
    pub fn answer(
        &mut self,
        answer: &str,
    ) -> Result<Option<Command>, SessionError> {
        let Some(pending) = &self.pending else {
            tracing::debug!(answer, "no pending question; answer ignored");
            return Ok(None);
        };
        let kind = pending.kind.clone();

        if kind.answer_shape() == AnswerShape::HandIndex && self.gate.locked {
            return Err(SessionError::Locked);
        }
        if single_word(answer).is_err() || !self.choices_for(&kind).accepts(answer)
        {
            return Err(SessionError::InvalidAnswer {
                kind,
                answer: answer.to_string(),
            });
        }

        self.pending = None;
        Ok(Some(Command::Answer {
            kind,
            answer: answer.to_string(),
        }))
    }

    // -- Actions -----------------------------------------------------------

    /// Turns a click on card `index` into a command, or explains why not.
    ///
    /// With a `favour_what` question pending, the click answers it. With a
    /// combo selected, it plays `combo` copies of the clicked card's type
    /// and resets the selector. Otherwise it is a plain `play`.
    pub fn play_card(&mut self, index: usize) -> Result<Command, SessionError> {
        self.require_active()?;
        let card = self.hand.get(index).cloned().ok_or(
            SessionError::OutOfRange {
                index,
                len: self.hand.len(),
            },
        )?;

        if let Some(pending) = &self.pending {
            if pending.kind != QuestionKind::FavourWhat {
                return Err(SessionError::QuestionPending(pending.kind.clone()));
            }
            if self.gate.locked {
                return Err(SessionError::Locked);
            }
            let kind = pending.kind.clone();
            self.pending = None;
            tracing::debug!(index, %card, "card click answers favour_what");
            return Ok(Command::Answer {
                kind,
                answer: index.to_string(),
            });
        }

        if self.combo == Combo::OFF {
            return Err(SessionError::ComboDeselected);
        }

        let our_turn = self.is_our_turn();
        if self.combo.is_combo() {
            let held = self.hand.count(&card);
            gate::check_combo(self.gate, our_turn, &card, self.combo, held)?;
            let count = self.combo.multiplier();
            self.combo = Combo::SINGLE;
            return Ok(Command::PlayMultiple { count, card });
        }

        gate::check_single(self.gate, our_turn, &card)?;
        if self.gate.defusing && card.is_defuse() {
            self.gate.defusing = false;
        }
        Ok(Command::Play(index))
    }

    /// Draws a card to end our turn.
    pub fn draw(&self) -> Result<Command, SessionError> {
        self.require_active()?;
        if let Some(pending) = &self.pending {
            return Err(SessionError::QuestionPending(pending.kind.clone()));
        }
        if self.gate.locked {
            return Err(SessionError::Locked);
        }
        if !self.is_our_turn() {
            return Err(SessionError::NotYourTurn);
        }
        if self.gate.defusing {
            return Err(SessionError::DefuseOnly);
        }
        if !self.table.draw_pile {
            return Err(SessionError::EmptyDrawPile);
        }
        Ok(Command::Draw)
    }

    /// Interprets chat-box input: chat, or a raw command after `/`.
    pub fn chat(&self, input: &str) -> Result<Option<Command>, SessionError> {
        self.require_active()?;
        Ok(Command::from_chat_input(input))
    }

    // -- Snapshot ----------------------------------------------------------

    /// A read-only, serializable copy of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            name: self.identity.name.clone(),
            lobby: self.identity.lobby.clone(),
            phase: self.phase,
            roster: self.roster.clone(),
            now_playing: self.now_playing.clone(),
            our_turn: self.is_our_turn(),
            hand: self.hand.clone(),
            gate: self.gate,
            combo: self.combo,
            pending_question: self.pending.clone(),
            table: self.table.clone(),
        }
    }
}

/// Serializable view of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub lobby: String,
    pub phase: ConnectionPhase,
    pub roster: Roster,
    pub now_playing: Option<String>,
    pub our_turn: bool,
    pub hand: Hand,
    pub gate: GateFlags,
    pub combo: Combo,
    pub pending_question: Option<PendingQuestion>,
    pub table: TableView,
}

//! The seam between the client loop and whatever shows the game.
//!
//! The loop never draws anything. It reports [`Event`]s to a
//! [`Presentation`], along with the session as it stands after the event,
//! and the host decides how to show them. Two hosts come built in:
//!
//! - `Vec<Event>` records every event (handy in tests).
//! - `mpsc::UnboundedSender<Event>` forwards events to another task.

use serde::Serialize;
use tokio::sync::mpsc;
use wwwcats_protocol::{Card, QuestionKind};
use wwwcats_session::{Choices, Session, SessionError};

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CloseReason {
    /// The server sent `err`, usually with a code.
    ServerError {
        code: Option<String>,
        message: String,
    },
    /// The server speaks a protocol revision we do not. `server` is the
    /// token as sent, which may not even be a number.
    VersionMismatch { server: String, client: u32 },
    /// The server hung up.
    TransportClosed,
    /// The connection failed.
    TransportFailed(String),
    /// Every intent sender was dropped.
    Shutdown,
}

/// Which part of the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Roster,
    Hand,
    Turn,
    Table,
    Gate,
}

/// Cards to flash up briefly. Carries no game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    Cards(Vec<Card>),
    /// Someone else drew; show a card back.
    FaceDown,
}

/// Something the user should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The server accepted our join.
    Entered,
    /// A line for the game log.
    Log(String),
    Chat { name: String, text: String },
    Reveal(Reveal),
    /// Show the info panel with this text, or hide it.
    Info(Option<String>),
    /// It just became our turn.
    Attention,
    /// The server asked us something.
    Question {
        kind: QuestionKind,
        prompt: String,
        choices: Choices,
    },
    /// The pending question went away without an answer from us.
    QuestionCleared,
    /// A local action was refused; nothing was sent.
    Rejected { error: SessionError, message: String },
    Changed(Aspect),
    Closed(CloseReason),
}

/// Receives events from the client loop.
pub trait Presentation: Send {
    fn notify(&mut self, session: &Session, event: Event);
}

impl Presentation for Vec<Event> {
    fn notify(&mut self, _session: &Session, event: Event) {
        self.push(event);
    }
}

impl Presentation for mpsc::UnboundedSender<Event> {
    fn notify(&mut self, _session: &Session, event: Event) {
        if self.send(event).is_err() {
            tracing::debug!("presentation receiver dropped; event discarded");
        }
    }
}

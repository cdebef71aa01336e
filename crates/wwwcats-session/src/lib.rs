//! Client session state for wwwcats.
//!
//! This crate holds everything the client knows about the lobby it is in,
//! and decides which local actions are legal right now:
//!
//! 1. **Lifecycle** — [`ConnectionPhase`] from join request to close
//! 2. **Mirror state** — [`Roster`], turn, [`Hand`], [`TableView`]
//! 3. **Gating** — [`GateFlags`] and [`Combo`] rules for card play
//! 4. **Questions** — the [`PendingQuestion`] sub-machine
//!
//! Nothing here does I/O. Actions return the [`Command`](wwwcats_protocol::Command)
//! to send, or a [`SessionError`] explaining why nothing should be sent.
//!
//! # How it fits in the stack
//!
//! ```text
//! Client loop (above)  ← dispatches inbound messages, performs intents
//!     ↕
//! Session Layer (this crate)  ← owns state, enforces local rules
//!     ↕
//! Protocol Layer (below)  ← provides Card, Command, QuestionKind
//! ```

mod error;
mod gate;
mod hand;
mod question;
mod roster;
mod session;

pub use error::SessionError;
pub use gate::{Combo, GateFlags};
pub use hand::Hand;
pub use question::{Choices, PendingQuestion};
pub use roster::Roster;
pub use session::{
    ConnectionPhase, Identity, Session, SessionSnapshot, TableView,
};

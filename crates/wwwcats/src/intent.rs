//! Local intents: what the user asked for, turned into at most one command.
//!
//! Every intent goes through [`apply`], which asks the session whether the
//! action is legal right now. A refused action is reported as
//! [`Event::Rejected`] and nothing is sent.

use tokio::sync::oneshot;
use wwwcats_protocol::{Command, Locale};
use wwwcats_session::{Session, SessionError, SessionSnapshot};

use crate::presentation::{Aspect, Event, Presentation};

/// A local action requested by the user.
#[derive(Debug)]
pub enum Intent {
    /// Chat-box input. A leading `/` sends the rest as a raw command.
    Chat(String),
    Draw,
    /// Click on the card at this hand index.
    PlayCard(usize),
    /// Set the combo selector (0 to 3).
    SelectCombo(u8),
    /// Answer the pending question.
    Answer(String),
    Sort,
    /// Move from spectator to player.
    JoinGame,
    /// Move from player to spectator.
    LeaveGame,
    StartGame,
    /// Ask for a copy of the session.
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

/// Runs `intent` against `session`, returning the command to send, if any.
pub(crate) fn apply(
    session: &mut Session,
    intent: Intent,
    locale: &dyn Locale,
    out: &mut impl Presentation,
) -> Option<Command> {
    let result = match intent {
        Intent::Chat(input) => session.chat(&input),
        Intent::Draw => session.draw().map(Some),
        Intent::PlayCard(index) => session.play_card(index).map(Some),
        Intent::SelectCombo(multiplier) => {
            session.select_combo(multiplier).map(|combo| {
                tracing::debug!(combo = combo.multiplier(), "combo selected");
                out.notify(session, Event::Changed(Aspect::Gate));
                None
            })
        }
        Intent::Answer(answer) => session.answer(&answer),
        Intent::Sort => lobby_command(session, Command::Sort),
        Intent::JoinGame => lobby_command(session, Command::JoinGame),
        Intent::LeaveGame => lobby_command(session, Command::LeaveGame),
        Intent::StartGame => lobby_command(session, Command::StartGame),
        Intent::Snapshot(reply) => {
            if reply.send(session.snapshot()).is_err() {
                tracing::debug!("snapshot requester went away");
            }
            Ok(None)
        }
    };

    match result {
        Ok(command) => command,
        Err(error) => {
            let message = error
                .locale_key()
                .map(|key| locale.text(&key))
                .unwrap_or_else(|| error.to_string());
            tracing::debug!(%error, "local action refused");
            out.notify(session, Event::Rejected { error, message });
            None
        }
    }
}

fn lobby_command(
    session: &Session,
    command: Command,
) -> Result<Option<Command>, SessionError> {
    session.require_active()?;
    Ok(Some(command))
}

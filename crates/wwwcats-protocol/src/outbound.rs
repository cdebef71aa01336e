//! Outbound commands: everything the client can ask the server to do.

use std::fmt;

use crate::{Card, ProtocolError, QuestionKind};

/// Prefix that marks chat input as a raw protocol command.
pub const RAW_COMMAND_MARKER: char = '/';

/// A command the client sends to the server.
///
/// `Display` renders the exact wire text; see [`crate::TextCodec::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `join_lobby <lobby> <name>`: the handshake. Build it with
    /// [`Command::join_lobby`] so both tokens are validated.
    JoinLobby { lobby: String, name: String },
    /// `chat <text>`
    Chat(String),
    /// `draw`
    Draw,
    /// `play <index>`
    Play(usize),
    /// `play_multiple <n> <cardType>`
    PlayMultiple { count: u8, card: Card },
    /// `sort`: ask the server to reorder our hand.
    Sort,
    /// `a <kind> <answer>`
    Answer { kind: QuestionKind, answer: String },
    /// `join`: move from the spectators to the players.
    JoinGame,
    /// `leave`: move from the players back to the spectators.
    LeaveGame,
    /// `start`: deal the cards.
    StartGame,
    /// Anything typed after the raw-command marker, forwarded verbatim.
    Raw(String),
}

impl Command {
    /// Builds the handshake command, rejecting names the server would split.
    pub fn join_lobby(
        lobby: &str,
        name: &str,
    ) -> Result<Self, ProtocolError> {
        Ok(Self::JoinLobby {
            lobby: single_word(lobby)?.to_string(),
            name: single_word(name)?.to_string(),
        })
    }

    /// Interprets a line typed into the chat box.
    ///
    /// `"/start"` becomes `Raw("start")`; anything else is chat. Returns
    /// `None` for input that would send nothing (empty, or a bare marker).
    pub fn from_chat_input(input: &str) -> Option<Self> {
        match input.strip_prefix(RAW_COMMAND_MARKER) {
            Some("") => None,
            Some(raw) => Some(Self::Raw(raw.to_string())),
            None if input.is_empty() => None,
            None => Some(Self::Chat(input.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JoinLobby { lobby, name } => {
                write!(f, "join_lobby {lobby} {name}")
            }
            Self::Chat(text) => write!(f, "chat {text}"),
            Self::Draw => f.write_str("draw"),
            Self::Play(index) => write!(f, "play {index}"),
            Self::PlayMultiple { count, card } => {
                write!(f, "play_multiple {count} {card}")
            }
            Self::Sort => f.write_str("sort"),
            Self::Answer { kind, answer } => write!(f, "a {kind} {answer}"),
            Self::JoinGame => f.write_str("join"),
            Self::LeaveGame => f.write_str("leave"),
            Self::StartGame => f.write_str("start"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// Checks that `token` is one non-empty word.
pub fn single_word(token: &str) -> Result<&str, ProtocolError> {
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(ProtocolError::InvalidToken(token.to_string()));
    }
    Ok(token)
}

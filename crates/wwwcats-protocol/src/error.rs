//! Error types for the protocol layer.
//!
//! Every variant here describes a message that could not be turned into a
//! typed value. None of them are fatal: the dispatcher logs them and moves
//! on to the next message, because the server may speak a newer dialect
//! than this client knows.

/// Errors that can occur while parsing or building protocol messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The message had no opcode at all.
    #[error("empty message")]
    Empty,

    /// The opcode is not bound in the active opcode table.
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),

    /// A required positional argument was absent (or empty).
    ///
    /// `position` counts from 1, the first token after the opcode.
    #[error("`{opcode}` is missing argument {position}")]
    MissingArgument {
        opcode: &'static str,
        position: usize,
    },

    /// An argument was present but could not be interpreted.
    #[error("`{opcode}` has invalid argument `{value}`")]
    InvalidArgument {
        opcode: &'static str,
        value: String,
    },

    /// No opcode table exists for this protocol version.
    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u32),

    /// An outbound token was empty or contained a space, which would
    /// change how the server splits the command.
    #[error("`{0}` must be a single non-empty word")]
    InvalidToken(String),
}

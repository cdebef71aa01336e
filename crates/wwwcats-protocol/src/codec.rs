//! The text codec: one message in, one typed value out (and back).
//!
//! [`TextCodec`] pins an [`OpcodeTable`], so the same raw text can mean
//! different things under different protocol revisions. Build one with
//! [`TextCodec::new`] for the compiled revision, or with
//! [`TextCodec::for_version`] when a server announces its own.

use crate::table::{OpcodeTable, PROTOCOL_VERSION};
use crate::{Command, ProtocolError, ServerMessage};

/// Encodes [`Command`]s and decodes [`ServerMessage`]s for one revision.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    table: &'static OpcodeTable,
}

impl TextCodec {
    /// A codec for [`PROTOCOL_VERSION`].
    pub fn new() -> Self {
        Self {
            table: OpcodeTable::current(),
        }
    }

    /// A codec for `version`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnsupportedVersion`] if this client has no
    /// table for `version`.
    pub fn for_version(version: u32) -> Result<Self, ProtocolError> {
        OpcodeTable::for_version(version)
            .map(|table| Self { table })
            .ok_or(ProtocolError::UnsupportedVersion(version))
    }

    /// The revision this codec speaks.
    pub fn version(&self) -> u32 {
        self.table.version()
    }

    /// Returns `true` if this codec speaks the compiled revision.
    pub fn is_current(&self) -> bool {
        self.version() == PROTOCOL_VERSION
    }

    /// Parses one inbound message.
    pub fn decode(&self, raw: &str) -> Result<ServerMessage, ProtocolError> {
        let msg = ServerMessage::parse(raw, self.table);
        tracing::trace!(raw, ok = msg.is_ok(), "decoded inbound message");
        msg
    }

    /// Renders one outbound command.
    pub fn encode(&self, command: &Command) -> String {
        command.to_string()
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new()
    }
}

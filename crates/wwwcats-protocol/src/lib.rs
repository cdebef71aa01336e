//! Wire protocol for wwwcats.
//!
//! Every message is one line of space-separated text whose first token is
//! the opcode. This crate turns that text into typed values and back:
//!
//! - **Tokenizer** ([`Tokens`]) — splits a message, keeping free-text tails
//!   intact.
//! - **Opcode tables** ([`OpcodeTable`], [`Opcode`]) — per-revision
//!   bindings from wire tokens to meanings.
//! - **Messages** ([`ServerMessage`], [`Command`]) — inbound and outbound.
//! - **Vocabulary** ([`Card`], [`QuestionKind`], [`LocaleKey`]).
//! - **Codec** ([`TextCodec`]) — decode/encode against one revision.
//!
//! # Architecture
//!
//! ```text
//! Transport (text) → Protocol (ServerMessage / Command) → Session (state)
//! ```

mod card;
mod codec;
mod error;
mod inbound;
mod locale;
mod outbound;
mod question;
mod table;
mod token;

pub use card::{CATALOGUE, Card, CardKind};
pub use codec::TextCodec;
pub use error::ProtocolError;
pub use inbound::{Exchange, ServerMessage};
pub use locale::{English, KeyPrefix, Locale, LocaleKey};
pub use outbound::{Command, RAW_COMMAND_MARKER, single_word};
pub use question::{AnswerShape, QuestionKind};
pub use table::{Opcode, OpcodeTable, PROTOCOL_VERSION};
pub use token::Tokens;

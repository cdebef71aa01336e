//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Where to connect and who to be.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes:
///
/// ```json
/// { "url": "ws://cats.example.org/ws", "lobby": "fridaynight", "name": "alice" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server.
    pub url: String,

    /// Lobby to join. One word.
    pub lobby: String,

    /// Display name. One word, unique within the lobby.
    pub name: String,

    /// How many local actions may queue up while a message is processed.
    ///
    /// Default: 32.
    pub intent_capacity: usize,

    /// `tracing` filter used by binaries that install a subscriber.
    ///
    /// Default: `info`. `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl ClientConfig {
    /// Parses a config from JSON, filling in defaults for missing fields.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8080/ws".to_string(),
            lobby: "default".to_string(),
            name: String::new(),
            intent_capacity: 32,
            log_filter: "info".to_string(),
        }
    }
}

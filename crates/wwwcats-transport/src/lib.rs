//! Transport abstraction layer for wwwcats.
//!
//! The game protocol is a stream of short text messages over one persistent
//! connection. [`Connection`] is the seam between that stream and the rest of
//! the client: the session loop only ever calls `send_text`, `recv_text` and
//! `close`, so tests can script a fake server and other transports can slot
//! in later.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket client transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::WebSocketConnection;

/// A single client connection that carries text messages.
///
/// Framing is the transport's job: one call to [`send_text`](Self::send_text)
/// is one protocol message, and one successful
/// [`recv_text`](Self::recv_text) yields exactly one protocol message.
pub trait Connection: Send + Sync + 'static {
    /// Sends one text message to the server.
    async fn send_text(&self, text: &str) -> Result<(), TransportError>;

    /// Receives the next text message from the server.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv_text(&self) -> Result<Option<String>, TransportError>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), TransportError>;

    /// The address this connection was opened against, for logging.
    fn endpoint(&self) -> &str;
}

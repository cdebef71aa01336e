//! # wwwcats
//!
//! Client for Detonating Cats, a multiplayer card game played over a
//! WebSocket text protocol.
//!
//! The server is authoritative. The client mirrors what the server tells it
//! into a [`Session`](wwwcats_session::Session), refuses obviously illegal
//! actions before they are sent, and reports everything else to a
//! [`Presentation`] of the host's choosing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wwwcats::prelude::*;
//!
//! # async fn play() -> Result<(), ClientError> {
//! let (client, handle) = ClientBuilder::new()
//!     .url("ws://127.0.0.1:8080/ws")
//!     .lobby("den")
//!     .name("alice")
//!     .connect()
//!     .await?;
//!
//! tokio::spawn(async move {
//!     let _ = handle.send(Intent::Chat("hello".into())).await;
//! });
//!
//! let mut events: Vec<Event> = Vec::new();
//! let reason = client.run(&mut events).await;
//! println!("session ended: {reason:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod dispatch;
mod error;
mod intent;
mod presentation;

pub use client::{Client, ClientBuilder, ClientHandle};
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, Flow};
pub use error::ClientError;
pub use intent::Intent;
pub use presentation::{Aspect, CloseReason, Event, Presentation, Reveal};

pub mod prelude {
    pub use crate::{
        Aspect, Client, ClientBuilder, ClientConfig, ClientError,
        ClientHandle, CloseReason, Dispatcher, Event, Flow, Intent,
        Presentation, Reveal,
    };
    pub use wwwcats_protocol::{Card, Command, QuestionKind};
    pub use wwwcats_session::{
        Choices, ConnectionPhase, Session, SessionError, SessionSnapshot,
    };
    pub use wwwcats_transport::{Connection, WebSocketConnection};
}

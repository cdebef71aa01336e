//! `ClientBuilder` and the client run loop.
//!
//! This is the entry point for playing a game. It ties together all the
//! layers: transport → protocol → session → presentation.
//!
//! One task owns the [`Session`]. Inbound messages and local intents are
//! funnelled into that task through a single `select!`, so each is handled
//! to completion before the next starts and no locking is needed.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use wwwcats_protocol::{Command, English, Locale};
use wwwcats_session::{Identity, Session, SessionSnapshot};
use wwwcats_transport::{Connection, WebSocketConnection};

use crate::dispatch::{Dispatcher, Flow};
use crate::intent::{self, Intent};
use crate::presentation::{CloseReason, Event, Presentation};
use crate::{ClientConfig, ClientError};

/// Builder for configuring and connecting a client.
///
/// # Example
///
/// ```rust,ignore
/// use wwwcats::prelude::*;
///
/// let (client, handle) = ClientBuilder::new()
///     .url("ws://127.0.0.1:8080/ws")
///     .lobby("den")
///     .name("alice")
///     .connect()
///     .await?;
/// let reason = client.run(&mut events).await;
/// ```
pub struct ClientBuilder {
    config: ClientConfig,
    locale: Arc<dyn Locale>,
}

impl ClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Starts from a loaded config.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            locale: Arc::new(English),
        }
    }

    /// Sets the server endpoint.
    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    pub fn lobby(mut self, lobby: &str) -> Self {
        self.config.lobby = lobby.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    /// Sets how many intents may wait while a message is handled.
    pub fn intent_capacity(mut self, capacity: usize) -> Self {
        self.config.intent_capacity = capacity;
        self
    }

    /// Replaces the built-in English strings.
    pub fn locale(mut self, locale: impl Locale + 'static) -> Self {
        self.locale = Arc::new(locale);
        self
    }

    /// Validates the identity, connects over WebSocket, and sends the join.
    ///
    /// # Errors
    /// A bad name or lobby fails before any connection is attempted.
    pub async fn connect(
        self,
    ) -> Result<(Client<WebSocketConnection>, ClientHandle), ClientError> {
        let session = self.session()?;
        let conn = WebSocketConnection::connect(&self.config.url).await?;
        self.start(session, conn).await
    }

    /// Like [`connect`](Self::connect), over an already-open connection.
    pub async fn with_connection<C: Connection>(
        self,
        conn: C,
    ) -> Result<(Client<C>, ClientHandle), ClientError> {
        let session = self.session()?;
        self.start(session, conn).await
    }

    fn session(&self) -> Result<Session, ClientError> {
        let identity = Identity::new(&self.config.lobby, &self.config.name)?;
        let mut session = Session::new(identity);
        session.begin_connect()?;
        Ok(session)
    }

    async fn start<C: Connection>(
        self,
        mut session: Session,
        conn: C,
    ) -> Result<(Client<C>, ClientHandle), ClientError> {
        let dispatcher = Dispatcher::new(self.locale);
        let join = session.transport_ready()?;
        conn.send_text(&dispatcher.codec().encode(&join)).await?;
        tracing::info!(
            endpoint = conn.endpoint(),
            lobby = session.identity().lobby(),
            name = session.identity().name(),
            "join requested"
        );

        let (tx, rx) = mpsc::channel(self.config.intent_capacity.max(1));
        let client = Client {
            conn,
            session,
            dispatcher,
            intents: rx,
        };
        Ok((client, ClientHandle { tx }))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends intents to a running [`Client`].
///
/// Cheap to clone. When every handle is dropped the client shuts down.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    tx: mpsc::Sender<Intent>,
}

impl ClientHandle {
    /// Queues `intent` for the client loop.
    ///
    /// # Errors
    /// [`ClientError::Stopped`] once the loop has finished.
    pub async fn send(&self, intent: Intent) -> Result<(), ClientError> {
        self.tx.send(intent).await.map_err(|_| ClientError::Stopped)
    }

    /// Asks the loop for a copy of the session.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, ClientError> {
        let (reply, rx) = oneshot::channel();
        self.send(Intent::Snapshot(reply)).await?;
        rx.await.map_err(|_| ClientError::Stopped)
    }
}

/// A connected client, ready to [`run`](Self::run).
pub struct Client<C: Connection> {
    conn: C,
    session: Session,
    dispatcher: Dispatcher,
    intents: mpsc::Receiver<Intent>,
}

impl<C: Connection> Client<C> {
    /// The session as it stands.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until the session closes, reporting events to `out`.
    ///
    /// Returns why the session ended. Nothing is processed after the first
    /// fatal message, even if more are already buffered.
    pub async fn run(mut self, out: &mut impl Presentation) -> CloseReason {
        let reason = loop {
            tokio::select! {
                inbound = self.conn.recv_text() => match inbound {
                    Ok(Some(raw)) => {
                        let flow = self.dispatcher.handle_raw(
                            &mut self.session,
                            &raw,
                            out,
                        );
                        if let Flow::Close(reason) = flow {
                            break reason;
                        }
                    }
                    Ok(None) => break CloseReason::TransportClosed,
                    Err(e) => {
                        tracing::warn!(error = %e, "connection failed");
                        break CloseReason::TransportFailed(e.to_string());
                    }
                },
                intent = self.intents.recv() => match intent {
                    Some(intent) => {
                        let command = intent::apply(
                            &mut self.session,
                            intent,
                            self.dispatcher.locale(),
                            out,
                        );
                        if let Some(command) = command {
                            self.send(&command).await;
                        }
                    }
                    None => break CloseReason::Shutdown,
                },
            }
        };

        tracing::info!(?reason, "session ending");
        self.session.close();
        if let Err(e) = self.conn.close().await {
            tracing::debug!(error = %e, "close failed");
        }
        out.notify(&self.session, Event::Closed(reason.clone()));
        reason
    }

    /// The single send path. Failures are logged and dropped.
    async fn send(&self, command: &Command) {
        let text = self.dispatcher.codec().encode(command);
        if let Err(e) = self.conn.send_text(&text).await {
            tracing::debug!(error = %e, %text, "send failed; command dropped");
        }
    }
}

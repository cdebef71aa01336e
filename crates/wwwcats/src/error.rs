//! Unified error type for the wwwcats client.

use wwwcats_protocol::ProtocolError;
use wwwcats_session::SessionError;
use wwwcats_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// These are failures to *start* or *drive* a client. How a running session
/// ends (server error, version mismatch, hang-up) is not an error; see
/// [`CloseReason`](crate::CloseReason).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unknown opcode, bad argument, bad version).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (bad identity, refused action).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration could not be parsed.
    #[error("invalid client config: {0}")]
    Config(#[from] serde_json::Error),

    /// The client loop has stopped and accepts no more intents.
    #[error("client has stopped")]
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Transport(_)));
        assert!(client_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::UnsupportedVersion(2);
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let client_err: ClientError = SessionError::AlreadyConnecting.into();
        assert!(matches!(client_err, ClientError::Session(_)));
        assert_eq!(client_err.to_string(), "already connecting");
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let client_err: ClientError = err.into();
        assert!(matches!(client_err, ClientError::Config(_)));
    }
}

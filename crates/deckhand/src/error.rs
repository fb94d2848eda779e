//! Error types for the plugin runtime.
//!
//! Fatal conditions (dial, handshake, read failures) surface as
//! [`PluginError`] from [`crate::Plugin::run`]. Per-message conditions
//! (malformed envelopes, unknown actions, handler failures) are
//! recovered inside the dispatcher and only logged.

use deckhand_core::DomainError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Failure of the underlying message transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// WebSocket protocol or I/O failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// The other end is gone
    #[error("Transport closed")]
    Closed,

    /// Injected or adapter-specific failure
    #[error("Transport error: {0}")]
    Other(String),
}

/// Errors establishing the connection to the host.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The WebSocket could not be opened
    #[error("Failed to connect to {url}: {reason}")]
    Dial { url: String, reason: String },

    /// The registration message could not be written
    #[error("Registration handshake failed: {0}")]
    Handshake(#[source] SendError),
}

/// Errors writing an outbound command.
#[derive(Error, Debug)]
pub enum SendError {
    /// The payload could not be serialized
    #[error("Failed to serialize command: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The message could not be written
    #[error("Failed to write command: {0}")]
    Transport(#[from] TransportError),
}

/// Errors that end the plugin.
#[derive(Error, Debug)]
pub enum PluginError {
    /// `run` was called before any action was registered
    #[error("At least one action must be registered")]
    NoActions,

    /// Registration was rejected
    #[error(transparent)]
    Registry(#[from] DomainError),

    /// Dial or handshake failed
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The read loop hit a transport failure
    #[error("Read failed: {0}")]
    Read(#[source] TransportError),

    /// The host closed the connection
    #[error("Connection closed by host")]
    Closed,
}

/// Convenience Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;
    use deckhand_core::ActionId;

    #[test]
    fn test_dial_error_display() {
        let err = ConnectionError::Dial {
            url: "ws://localhost:28196".to_string(),
            reason: "refused".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("ws://localhost:28196"));
        assert!(display.contains("refused"));
    }

    #[test]
    fn test_send_error_from_transport() {
        let err: SendError = TransportError::Closed.into();
        assert!(matches!(err, SendError::Transport(TransportError::Closed)));
        assert!(err.to_string().contains("Transport closed"));
    }

    #[test]
    fn test_plugin_error_from_domain() {
        let err: PluginError = DomainError::DuplicateAction {
            action_id: ActionId::new("com.a.b"),
        }
        .into();
        assert!(matches!(err, PluginError::Registry(_)));
        assert_eq!(err.to_string(), "Action already registered: com.a.b");
    }

    #[test]
    fn test_read_error_display() {
        let err = PluginError::Read(TransportError::Other("reset".to_string()));
        assert_eq!(err.to_string(), "Read failed: Transport error: reset");
    }
}

//! Connection establishment and the registration handshake.
//!
//! The plugin dials the host's WebSocket once at startup and immediately
//! registers itself. Both steps are fatal on failure: there is no retry
//! and no reconnection.

use deckhand_protocol::Registration;
use tracing::{debug, info};

use crate::config::PluginConfig;
use crate::error::{ConnectionError, SendError};
use crate::transport::{websocket, MessageSink, MessageSource};

/// A live connection to the host, split into its two halves.
pub struct Connection {
    source: Box<dyn MessageSource>,
    sink: Box<dyn MessageSink>,
}

impl Connection {
    /// Assembles a connection from any transport halves.
    pub fn new(source: Box<dyn MessageSource>, sink: Box<dyn MessageSink>) -> Self {
        Self { source, sink }
    }

    /// Writes the registration handshake.
    ///
    /// Must be the first message the host receives from the plugin.
    pub async fn register(&mut self, registration: &Registration) -> Result<(), ConnectionError> {
        let json = serde_json::to_string(registration)
            .map_err(|e| ConnectionError::Handshake(SendError::Serialize(e)))?;

        self.sink
            .send(json)
            .await
            .map_err(|e| ConnectionError::Handshake(SendError::Transport(e)))?;

        info!(
            event = %registration.event,
            uuid = %registration.uuid,
            "Registered with host"
        );
        Ok(())
    }

    pub fn source_mut(&mut self) -> &mut dyn MessageSource {
        self.source.as_mut()
    }

    pub fn sink_mut(&mut self) -> &mut dyn MessageSink {
        self.sink.as_mut()
    }

    /// Splits into read and write halves.
    pub fn into_split(self) -> (Box<dyn MessageSource>, Box<dyn MessageSink>) {
        (self.source, self.sink)
    }
}

/// Opens a WebSocket to `url` without registering.
pub async fn dial(url: &str) -> Result<Connection, ConnectionError> {
    debug!(url, "Dialing host");

    let (stream, response) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| ConnectionError::Dial {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!(status = %response.status(), "WebSocket upgrade complete");

    let (source, sink) = websocket::split(stream);
    Ok(Connection::new(Box::new(source), Box::new(sink)))
}

/// Opens the host WebSocket described by `config` and registers.
pub async fn connect(config: &PluginConfig) -> Result<Connection, ConnectionError> {
    let url = config.websocket_url();
    info!(url = %url, "Connecting to host");

    let mut connection = dial(&url).await?;
    connection.register(&config.registration()).await?;
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory_transport;

    #[tokio::test]
    async fn test_register_writes_handshake() {
        let (mut connection, mut host) = memory_transport();

        connection
            .register(&Registration::new("registerPlugin", "PLUGIN-1"))
            .await
            .unwrap();

        assert_eq!(
            host.try_recv().as_deref(),
            Some(r#"{"event":"registerPlugin","uuid":"PLUGIN-1"}"#)
        );
    }

    #[tokio::test]
    async fn test_register_fails_on_closed_transport() {
        let (mut connection, host) = memory_transport();
        drop(host);

        let result = connection
            .register(&Registration::new("registerPlugin", "PLUGIN-1"))
            .await;
        assert!(matches!(result, Err(ConnectionError::Handshake(_))));
    }

    #[tokio::test]
    async fn test_dial_refused() {
        // Port 1 is privileged and never serves WebSockets in test environments
        let result = dial("ws://127.0.0.1:1").await;
        assert!(matches!(result, Err(ConnectionError::Dial { .. })));
    }
}

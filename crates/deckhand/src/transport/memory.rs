//! In-process transport backed by tokio channels.
//!
//! Plays the host's side of the connection without a socket: feed
//! events with [`MemoryHost::send`] and observe the plugin's outbound
//! messages with [`MemoryHost::try_recv`] / [`MemoryHost::recv`].

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessageSink, MessageSource};
use crate::connection::Connection;
use crate::error::TransportError;

type Inbound = Result<String, TransportError>;

/// Plugin-side read half.
pub struct MemorySource {
    rx: mpsc::UnboundedReceiver<Inbound>,
}

/// Plugin-side write half.
pub struct MemorySink {
    tx: mpsc::UnboundedSender<String>,
}

/// Host-side end of a memory transport.
pub struct MemoryHost {
    to_plugin: Option<mpsc::UnboundedSender<Inbound>>,
    from_plugin: mpsc::UnboundedReceiver<String>,
}

/// Creates a connected plugin/host pair.
pub fn memory_transport() -> (Connection, MemoryHost) {
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    let connection = Connection::new(
        Box::new(MemorySource { rx: in_rx }),
        Box::new(MemorySink { tx: out_tx }),
    );
    let host = MemoryHost {
        to_plugin: Some(in_tx),
        from_plugin: out_rx,
    };
    (connection, host)
}

impl MemoryHost {
    /// Delivers a text message to the plugin.
    ///
    /// Returns false if the plugin side is gone or the host already closed.
    pub fn send(&self, text: impl Into<String>) -> bool {
        match &self.to_plugin {
            Some(tx) => tx.send(Ok(text.into())).is_ok(),
            None => false,
        }
    }

    /// Makes the plugin's next read fail with `error`.
    pub fn fail(&self, error: TransportError) -> bool {
        match &self.to_plugin {
            Some(tx) => tx.send(Err(error)).is_ok(),
            None => false,
        }
    }

    /// Closes the host-to-plugin direction. Messages already sent are
    /// still delivered before the plugin observes the close.
    pub fn close(&mut self) {
        self.to_plugin = None;
    }

    /// Takes the next outbound message if one is queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.from_plugin.try_recv().ok()
    }

    /// Waits for the next outbound message.
    pub async fn recv(&mut self) -> Option<String> {
        self.from_plugin.recv().await
    }

    /// Takes every queued outbound message, parsed as JSON.
    pub fn drain_json(&mut self) -> Vec<serde_json::Value> {
        let mut messages = Vec::new();
        while let Some(text) = self.try_recv() {
            if let Ok(value) = serde_json::from_str(&text) {
                messages.push(value);
            }
        }
        messages
    }
}

#[async_trait]
impl MessageSource for MemorySource {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        match self.rx.recv().await {
            Some(Ok(text)) => Ok(Some(text)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.tx.send(text).map_err(|_| TransportError::Closed)
    }
}

//! Message transports between the plugin and the host.
//!
//! The runtime only needs whole text messages in both directions. The
//! connection is split in two halves: the read half is owned by the
//! dispatcher, the write half by the [`crate::CommandSender`]. Neither
//! half is shared, so no locking is needed and each message is written
//! in one piece.

use async_trait::async_trait;

use crate::error::TransportError;

pub mod memory;
pub mod websocket;

pub use memory::{memory_transport, MemoryHost, MemorySink, MemorySource};
pub use websocket::{WebSocketSink, WebSocketSource};

/// Read half of a connection.
#[async_trait]
pub trait MessageSource: Send {
    /// Waits for the next text message.
    ///
    /// Returns `Ok(None)` once the peer has closed the connection.
    async fn recv(&mut self) -> Result<Option<String>, TransportError>;
}

/// Write half of a connection.
#[async_trait]
pub trait MessageSink: Send {
    /// Writes one complete text message.
    async fn send(&mut self, text: String) -> Result<(), TransportError>;
}

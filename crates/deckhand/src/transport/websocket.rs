//! WebSocket transport over `tokio-tungstenite`.

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, warn};

use super::{MessageSink, MessageSource};
use crate::error::TransportError;

/// Read half of a WebSocket.
pub struct WebSocketSource<S> {
    inner: SplitStream<WebSocketStream<S>>,
}

/// Write half of a WebSocket.
pub struct WebSocketSink<S> {
    inner: SplitSink<WebSocketStream<S>, Message>,
}

/// Splits a WebSocket into its read and write halves.
pub fn split<S>(stream: WebSocketStream<S>) -> (WebSocketSource<S>, WebSocketSink<S>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (sink, source) = stream.split();
    (
        WebSocketSource { inner: source },
        WebSocketSink { inner: sink },
    )
}

#[async_trait]
impl<S> MessageSource for WebSocketSource<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            match self.inner.next().await {
                None => return Ok(None),
                Some(Err(e)) => return Err(TransportError::WebSocket(e)),
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => return Ok(Some(text)),
                    Err(e) => {
                        warn!(error = %e, "Dropping non UTF-8 binary frame");
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    debug!(frame = ?frame, "Host sent close frame");
                    return Ok(None);
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
            }
        }
    }
}

#[async_trait]
impl<S> MessageSink for WebSocketSink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.inner.send(Message::Text(text)).await?;
        Ok(())
    }
}

//! The read loop: decode host events and route them to actions.
//!
//! # States
//!
//! ```text
//! Idle ──run──▶ AwaitingMessage ──message──▶ Processing ──▶ AwaitingMessage
//!                      │
//!                      └──read failure / close──▶ Terminated
//! ```
//!
//! Per message: decode the envelope, resolve the action, decode the
//! event's sub-payload and await the handler. Malformed envelopes,
//! unknown actions, unknown event kinds and handler errors are logged
//! and the loop moves on. Only the transport can end it.

use deckhand_core::{ActionId, Context};
use deckhand_protocol::{Envelope, EventKind};
use tracing::{debug, error, info, warn};

use crate::action::HandlerResult;
use crate::connection::Connection;
use crate::error::PluginError;
use crate::registry::ActionRegistry;
use crate::sender::CommandSender;
use crate::transport::MessageSource;

/// Lifecycle state of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Built, loop not started
    Idle,
    /// Blocked on the next read
    AwaitingMessage,
    /// Decoding a message or running a handler
    Processing,
    /// The transport failed or closed
    Terminated,
}

/// Outcome of processing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The handler ran and returned `Ok`
    Handled { action: ActionId, event: EventKind },

    /// The handler ran and returned an error
    HandlerFailed {
        action: ActionId,
        event: EventKind,
        error: String,
    },

    /// The message was not a valid envelope
    Malformed { error: String },

    /// No action is registered under the envelope's identifier
    UnknownAction { action: ActionId },

    /// The event kind is not routed
    Ignored { action: ActionId, event: String },
}

impl Dispatch {
    /// Returns true if a handler was invoked.
    pub fn invoked_handler(&self) -> bool {
        matches!(self, Self::Handled { .. } | Self::HandlerFailed { .. })
    }
}

/// Owns the read half, the frozen registry and the command sender.
pub struct EventDispatcher {
    registry: ActionRegistry,
    source: Box<dyn MessageSource>,
    sender: CommandSender,
    state: DispatcherState,
    processed: u64,
}

impl EventDispatcher {
    /// Takes ownership of the registry; no action can be added afterwards.
    pub fn new(registry: ActionRegistry, connection: Connection) -> Self {
        let (source, sink) = connection.into_split();
        Self {
            registry,
            source,
            sender: CommandSender::new(sink),
            state: DispatcherState::Idle,
            processed: 0,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Number of inbound messages processed, whatever their outcome.
    pub fn processed_count(&self) -> u64 {
        self.processed
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Runs the read loop.
    ///
    /// Returns only when the connection is lost: `PluginError::Read` on a
    /// transport failure, `PluginError::Closed` when the host hangs up.
    /// Either way the dispatcher ends in `Terminated`.
    pub async fn run(&mut self) -> Result<(), PluginError> {
        info!(actions = self.registry.len(), "Dispatcher started");

        loop {
            self.state = DispatcherState::AwaitingMessage;

            let text = match self.source.recv().await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    self.state = DispatcherState::Terminated;
                    error!(processed = self.processed, "Host closed the connection");
                    return Err(PluginError::Closed);
                }
                Err(e) => {
                    self.state = DispatcherState::Terminated;
                    error!(error = %e, processed = self.processed, "Read failed");
                    return Err(PluginError::Read(e));
                }
            };

            self.process_message(&text).await;
        }
    }

    /// Decodes and routes a single message.
    pub async fn process_message(&mut self, text: &str) -> Dispatch {
        self.state = DispatcherState::Processing;
        self.processed = self.processed.saturating_add(1);

        let outcome = self.route(text).await;
        match &outcome {
            Dispatch::Handled { .. } => {}
            Dispatch::HandlerFailed {
                action,
                event,
                error,
            } => {
                warn!(action = %action, event = %event, error = %error, "Handler failed");
            }
            Dispatch::Malformed { error } => {
                warn!(error = %error, "Dropping malformed message");
            }
            Dispatch::UnknownAction { action } => {
                warn!(action = %action.display_name(), "Unknown action");
            }
            Dispatch::Ignored { action, event } => {
                debug!(action = %action, event = %event, "Ignoring unrouted event");
            }
        }

        self.state = DispatcherState::AwaitingMessage;
        outcome
    }

    async fn route(&mut self, text: &str) -> Dispatch {
        let envelope = match Envelope::decode(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Dispatch::Malformed {
                    error: e.to_string(),
                }
            }
        };

        debug!(
            action = %envelope.action,
            event = %envelope.event,
            context = %envelope.context,
            device = ?envelope.device,
            "Received event"
        );

        let Some(action) = self.registry.get_mut(&envelope.action) else {
            return Dispatch::UnknownAction {
                action: envelope.action,
            };
        };

        let Some(kind) = envelope.event_kind() else {
            return Dispatch::Ignored {
                action: envelope.action,
                event: envelope.event,
            };
        };

        let context: &Context = &envelope.context;
        let sender = &mut self.sender;

        let result: HandlerResult = match kind {
            EventKind::WillAppear => {
                action
                    .will_appear(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::WillDisappear => {
                action
                    .will_disappear(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::KeyDown => {
                action
                    .key_down(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::KeyUp => {
                action
                    .key_up(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::DidReceiveSettings => {
                action
                    .did_receive_settings(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::DidReceiveGlobalSettings => {
                action
                    .did_receive_global_settings(context, sender, envelope.payload_or_default())
                    .await
            }
            EventKind::SendToPlugin => {
                action
                    .property_inspector_message(context, sender, envelope.payload.clone())
                    .await
            }
        };

        match result {
            Ok(()) => Dispatch::Handled {
                action: envelope.action,
                event: kind,
            },
            Err(e) => Dispatch::HandlerFailed {
                action: envelope.action,
                event: kind,
                error: format!("{e:#}"),
            },
        }
    }
}

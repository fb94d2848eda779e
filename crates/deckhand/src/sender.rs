//! Typed outbound commands to the host.
//!
//! Each operation builds one [`OutboundCommand`], serializes it and
//! writes it as a single message on the connection's write half. Write
//! failures are returned to the caller and never retried.

use deckhand_core::{ActionId, Context, Target};
use deckhand_protocol::OutboundCommand;
use serde::Serialize;
use tracing::debug;

use crate::error::SendError;
use crate::transport::MessageSink;

/// Write side of the runtime, handed to action handlers.
pub struct CommandSender {
    sink: Box<dyn MessageSink>,
    sent: u64,
}

impl CommandSender {
    pub fn new(sink: Box<dyn MessageSink>) -> Self {
        Self { sink, sent: 0 }
    }

    /// Number of commands written so far.
    pub fn sent_count(&self) -> u64 {
        self.sent
    }

    /// Sets the title of a placement on both hardware and software.
    pub async fn set_title(&mut self, context: &Context, title: &str) -> Result<(), SendError> {
        self.set_title_for(context, title, Target::HardwareAndSoftware)
            .await
    }

    /// Sets the title of a placement on the given target.
    pub async fn set_title_for(
        &mut self,
        context: &Context,
        title: &str,
        target: Target,
    ) -> Result<(), SendError> {
        self.send(OutboundCommand::set_title(context.clone(), title, target))
            .await
    }

    /// Persists the settings of a placement.
    pub async fn set_settings<T>(&mut self, context: &Context, settings: &T) -> Result<(), SendError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(settings)?;
        self.send(OutboundCommand::set_settings(context.clone(), value))
            .await
    }

    /// Asks the host to answer with `didReceiveSettings`.
    pub async fn get_settings(&mut self, context: &Context) -> Result<(), SendError> {
        self.send(OutboundCommand::get_settings(context.clone())).await
    }

    /// Persists plugin-wide settings.
    pub async fn set_global_settings<T>(
        &mut self,
        context: &Context,
        settings: &T,
    ) -> Result<(), SendError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(settings)?;
        self.send(OutboundCommand::set_global_settings(context.clone(), value))
            .await
    }

    /// Asks the host to answer with `didReceiveGlobalSettings`.
    pub async fn get_global_settings(&mut self, context: &Context) -> Result<(), SendError> {
        self.send(OutboundCommand::get_global_settings(context.clone()))
            .await
    }

    /// Flashes a checkmark on the key.
    pub async fn show_ok(&mut self, context: &Context) -> Result<(), SendError> {
        self.send(OutboundCommand::show_ok(context.clone())).await
    }

    /// Flashes a warning triangle on the key.
    pub async fn show_alert(&mut self, context: &Context) -> Result<(), SendError> {
        self.send(OutboundCommand::show_alert(context.clone())).await
    }

    /// Sends arbitrary data to the property inspector of `action`.
    pub async fn send_to_property_inspector<T>(
        &mut self,
        context: &Context,
        action: &ActionId,
        data: &T,
    ) -> Result<(), SendError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(data)?;
        self.send(OutboundCommand::send_to_property_inspector(
            context.clone(),
            action.clone(),
            value,
        ))
        .await
    }

    /// Serializes and writes one command.
    pub async fn send(&mut self, command: OutboundCommand) -> Result<(), SendError> {
        let json = serde_json::to_string(&command)?;
        self.sink.send(json).await?;
        self.sent = self.sent.saturating_add(1);

        debug!(
            event = %command.event,
            context = %command.context,
            "Sent command to host"
        );
        Ok(())
    }
}

//! The handler interface implemented by plugin actions.

use async_trait::async_trait;
use deckhand_core::Context;
use deckhand_protocol::{AppearPayload, GlobalSettingsPayload, KeyPayload, SettingsPayload};

use crate::sender::CommandSender;

/// Result of a handler callback.
///
/// Errors are logged by the dispatcher together with the action and event
/// they came from; they never stop the read loop and are never reported
/// to the host.
pub type HandlerResult = anyhow::Result<()>;

/// One logical key function of a plugin.
///
/// The dispatcher routes every host event addressed to [`Action::id`] to
/// the matching method, passing the placement's context token and the
/// [`CommandSender`] for replies. Handlers run one at a time, in arrival
/// order, and their writes complete before the next event is read.
///
/// All handlers default to doing nothing.
///
/// # Example
///
/// ```rust
/// use deckhand::{Action, CommandSender, Context, HandlerResult, KeyPayload};
///
/// struct Hello;
///
/// #[deckhand::async_trait]
/// impl Action for Hello {
///     fn id(&self) -> &str {
///         "com.example.hello"
///     }
///
///     async fn key_up(
///         &mut self,
///         context: &Context,
///         sender: &mut CommandSender,
///         _payload: KeyPayload,
///     ) -> HandlerResult {
///         sender.set_title(context, "hi").await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Action: Send {
    /// Action identifier, as declared in the plugin manifest.
    fn id(&self) -> &str;

    /// `keyDown`
    async fn key_down(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: KeyPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `keyUp`
    async fn key_up(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: KeyPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `willAppear`
    async fn will_appear(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: AppearPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `willDisappear`
    async fn will_disappear(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: AppearPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `didReceiveSettings`
    async fn did_receive_settings(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: SettingsPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `didReceiveGlobalSettings`
    async fn did_receive_global_settings(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: GlobalSettingsPayload,
    ) -> HandlerResult {
        Ok(())
    }

    /// `sendToPlugin`: a free-form message from the property inspector,
    /// passed through undecoded.
    async fn property_inspector_message(
        &mut self,
        _context: &Context,
        _sender: &mut CommandSender,
        _payload: serde_json::Value,
    ) -> HandlerResult {
        Ok(())
    }
}

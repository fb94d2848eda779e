//! Plugin entry point.
//!
//! ```rust,no_run
//! use deckhand::{Action, Plugin, PluginConfig};
//!
//! struct Noop;
//!
//! #[deckhand::async_trait]
//! impl Action for Noop {
//!     fn id(&self) -> &str {
//!         "com.example.noop"
//!     }
//! }
//!
//! # async fn launch() -> Result<(), deckhand::PluginError> {
//! let config = PluginConfig::new(28196, "PLUGIN-UUID", "registerPlugin", "{}");
//! let mut plugin = Plugin::new(config);
//! plugin.register(Noop)?;
//! plugin.run().await
//! # }
//! ```

use tracing::info;

use crate::action::Action;
use crate::config::PluginConfig;
use crate::connection::{connect, Connection};
use crate::dispatcher::EventDispatcher;
use crate::error::PluginError;
use crate::registry::ActionRegistry;

/// A plugin: its launch configuration and the actions it serves.
///
/// Actions are registered up front. [`Plugin::run`] consumes the plugin,
/// so the set of actions cannot change once the connection is live.
pub struct Plugin {
    config: PluginConfig,
    registry: ActionRegistry,
}

impl Plugin {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            registry: ActionRegistry::new(),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Adds an action.
    ///
    /// # Errors
    ///
    /// - `PluginError::Registry` if an action with the same identifier is
    ///   already registered; the first one is kept.
    pub fn register<A: Action + 'static>(&mut self, action: A) -> Result<(), PluginError> {
        self.registry.register(action)?;
        Ok(())
    }

    /// Adds several actions, stopping at the first duplicate.
    pub fn register_all<I>(&mut self, actions: I) -> Result<(), PluginError>
    where
        I: IntoIterator<Item = Box<dyn Action>>,
    {
        self.registry.register_all(actions)?;
        Ok(())
    }

    /// Connects to the host, registers and dispatches events until the
    /// connection is lost.
    ///
    /// # Errors
    ///
    /// - `PluginError::NoActions` before any connection attempt if the
    ///   registry is empty
    /// - `PluginError::Connection` if dial or handshake fails
    /// - `PluginError::Read` / `PluginError::Closed` when the read loop ends
    pub async fn run(self) -> Result<(), PluginError> {
        self.ensure_actions()?;
        self.log_startup();

        let connection = connect(&self.config).await?;
        self.dispatch(connection).await
    }

    /// Like [`Plugin::run`], over an already open connection.
    ///
    /// The registration handshake is still written first.
    pub async fn run_on(self, mut connection: Connection) -> Result<(), PluginError> {
        self.ensure_actions()?;
        self.log_startup();

        connection.register(&self.config.registration()).await?;
        self.dispatch(connection).await
    }

    fn ensure_actions(&self) -> Result<(), PluginError> {
        if self.registry.is_empty() {
            return Err(PluginError::NoActions);
        }
        Ok(())
    }

    fn log_startup(&self) {
        let ids: Vec<&str> = self.registry.ids().into_iter().map(|id| id.as_str()).collect();
        info!(
            port = self.config.port,
            uuid = %self.config.plugin_uuid,
            actions = ?ids,
            "Starting plugin"
        );

        if let Some(host) = self.config.registration_info() {
            info!(
                application = host.application_version().unwrap_or("unknown"),
                platform = host.platform().unwrap_or("unknown"),
                plugin_version = host.plugin_version().unwrap_or("unknown"),
                devices = host.devices.len(),
                keys = host.total_keys(),
                "Host info"
            );
        }
    }

    async fn dispatch(self, connection: Connection) -> Result<(), PluginError> {
        let mut dispatcher = EventDispatcher::new(self.registry, connection);
        dispatcher.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory_transport;
    use crate::{CommandSender, Context, HandlerResult, KeyPayload};
    use serde_json::json;

    struct Echo;

    #[async_trait::async_trait]
    impl Action for Echo {
        fn id(&self) -> &str {
            "com.a.echo"
        }

        async fn key_up(
            &mut self,
            context: &Context,
            sender: &mut CommandSender,
            _payload: KeyPayload,
        ) -> HandlerResult {
            sender.set_title(context, "up").await?;
            Ok(())
        }
    }

    fn config() -> PluginConfig {
        PluginConfig::new(1, "PLUGIN-1", "registerPlugin", "{}")
    }

    #[tokio::test]
    async fn test_run_without_actions_fails_before_connecting() {
        let plugin = Plugin::new(config());
        let result = plugin.run().await;
        assert!(matches!(result, Err(PluginError::NoActions)));
    }

    #[tokio::test]
    async fn test_run_on_without_actions_writes_nothing() {
        let (connection, mut host) = memory_transport();
        let result = Plugin::new(config()).run_on(connection).await;

        assert!(matches!(result, Err(PluginError::NoActions)));
        assert!(host.try_recv().is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut plugin = Plugin::new(config());
        plugin.register(Echo).unwrap();

        let result = plugin.register(Echo);
        assert!(matches!(result, Err(PluginError::Registry(_))));
        assert_eq!(plugin.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_run_on_registers_then_dispatches() {
        let (connection, mut host) = memory_transport();
        let mut plugin = Plugin::new(config());
        plugin.register(Echo).unwrap();

        host.send(
            json!({"action": "com.a.echo", "event": "keyUp", "context": "K1", "payload": {}})
                .to_string(),
        );
        host.close();

        let result = plugin.run_on(connection).await;
        assert!(matches!(result, Err(PluginError::Closed)));

        let sent = host.drain_json();
        assert_eq!(
            sent,
            vec![
                json!({"event": "registerPlugin", "uuid": "PLUGIN-1"}),
                json!({"event": "setTitle", "context": "K1", "payload": {"title": "up", "target": 0}}),
            ]
        );
    }
}

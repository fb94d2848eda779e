//! Bootstrap configuration handed to the plugin by the host at launch.

use deckhand_protocol::{Registration, RegistrationInfo};
use tracing::warn;

/// Host used to reach the Stream Deck application.
pub const DEFAULT_HOST: &str = "localhost";

/// Launch parameters of a plugin process.
///
/// The host passes all four on the command line; how they are parsed is
/// up to the binary. Built once and passed to [`crate::Plugin::new`].
///
/// # Example
///
/// ```rust
/// use deckhand::PluginConfig;
///
/// let config = PluginConfig::new(28196, "PLUGIN-UUID", "registerPlugin", "{}");
/// assert_eq!(config.websocket_url(), "ws://localhost:28196");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Port of the host's WebSocket server
    pub port: u16,

    /// Opaque UUID identifying this plugin instance to the host
    pub plugin_uuid: String,

    /// Event name the registration handshake must carry
    pub register_event: String,

    /// Informational JSON describing host, plugin and devices
    pub info: String,
}

impl PluginConfig {
    pub fn new(
        port: u16,
        plugin_uuid: impl Into<String>,
        register_event: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self {
            port,
            plugin_uuid: plugin_uuid.into(),
            register_event: register_event.into(),
            info: info.into(),
        }
    }

    /// Returns the WebSocket URL of the host.
    pub fn websocket_url(&self) -> String {
        format!("ws://{DEFAULT_HOST}:{}", self.port)
    }

    /// Returns the registration handshake message.
    pub fn registration(&self) -> Registration {
        Registration::new(&self.register_event, &self.plugin_uuid)
    }

    /// Parses the info blob.
    ///
    /// The blob is informational only: a parse failure is logged and
    /// yields `None`.
    pub fn registration_info(&self) -> Option<RegistrationInfo> {
        match RegistrationInfo::parse(&self.info) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "Ignoring unparseable info payload");
                None
            }
        }
    }
}

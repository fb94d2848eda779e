//! deckhand - Stream Deck plugin runtime
//!
//! This crate provides the core infrastructure for a Stream Deck plugin:
//! - `registry` - Action registry keyed by action identifier
//! - `connection` - WebSocket connection and registration handshake
//! - `dispatcher` - Read loop decoding host events and routing them to actions
//! - `sender` - Typed outbound commands handed to action handlers
//! - `plugin` - Entry point tying the pieces together
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      plugin process                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌─────────────────┐     ┌─────────────────────────────┐   │
//! │  │   connection    │────▶│      EventDispatcher        │   │
//! │  │ (dial + register)│    │  read → decode → route      │   │
//! │  └────────┬────────┘     └──────────────┬──────────────┘   │
//! │           │ write half                  │ &mut              │
//! │           ▼                             ▼                   │
//! │  ┌─────────────────┐     ┌─────────────────────────────┐   │
//! │  │  CommandSender  │◀────│  ActionRegistry → dyn Action │   │
//! │  │ (setTitle, ...) │     │  (handler callbacks)         │   │
//! │  └─────────────────┘     └─────────────────────────────┘   │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one task: a handler's writes complete before the
//! next message is read, and the registry is frozen once the dispatcher
//! owns it.
//!
//! # Panic-Free Guarantees
//!
//! All production code in this crate follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations return `Result` or `Option`
//! - Channel operations handle closure gracefully

pub mod action;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod sender;
pub mod transport;

pub use action::{Action, HandlerResult};
pub use config::PluginConfig;
pub use connection::{connect, dial, Connection};
pub use dispatcher::{Dispatch, DispatcherState, EventDispatcher};
pub use error::{ConnectionError, PluginError, SendError, TransportError};
pub use plugin::Plugin;
pub use registry::ActionRegistry;
pub use sender::CommandSender;

// Re-exports so action crates only need this one dependency
pub use async_trait::async_trait;
pub use deckhand_core::{ActionId, Context, Coordinates, DeviceId, Target};
pub use deckhand_protocol::{AppearPayload, GlobalSettingsPayload, KeyPayload, SettingsPayload};

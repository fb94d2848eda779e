//! deckhand Protocol - Wire protocol for Stream Deck host communication
//!
//! This crate provides message types and parsing for the JSON messages
//! exchanged with the Stream Deck host over its WebSocket: the inbound
//! event envelope and its sub-payloads, the outbound command envelope,
//! the registration handshake and the informational launch blob.

pub mod event;
pub mod info;
pub mod message;
pub mod parse;

pub use event::{CommandKind, EventKind};
pub use info::{RawApplication, RawDevice, RawDeviceSize, RawPlugin, RegistrationInfo};
pub use message::{Envelope, OutboundCommand, Registration};
pub use parse::{AppearPayload, GlobalSettingsPayload, KeyPayload, SettingsPayload};

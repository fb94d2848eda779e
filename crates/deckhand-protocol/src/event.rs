//! Event and command names used on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events received from the Stream Deck host.
///
/// The set is closed: names the runtime does not route are parsed as
/// `None` by [`EventKind::from_event_name`] and dropped without
/// invoking any handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// An instance of the action became visible
    WillAppear,

    /// An instance of the action is about to be hidden
    WillDisappear,

    /// The key was pressed
    KeyDown,

    /// The key was released
    KeyUp,

    /// Response to `getSettings`, or settings changed in the inspector
    DidReceiveSettings,

    /// Response to `getGlobalSettings`
    DidReceiveGlobalSettings,

    /// Free-form message from the property inspector
    SendToPlugin,
}

impl EventKind {
    /// All routed event kinds, in dispatch table order.
    pub const ALL: [EventKind; 7] = [
        Self::WillAppear,
        Self::WillDisappear,
        Self::KeyDown,
        Self::KeyUp,
        Self::DidReceiveSettings,
        Self::DidReceiveGlobalSettings,
        Self::SendToPlugin,
    ];

    /// Parses from a wire event name.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "willAppear" => Some(Self::WillAppear),
            "willDisappear" => Some(Self::WillDisappear),
            "keyDown" => Some(Self::KeyDown),
            "keyUp" => Some(Self::KeyUp),
            "didReceiveSettings" => Some(Self::DidReceiveSettings),
            "didReceiveGlobalSettings" => Some(Self::DidReceiveGlobalSettings),
            "sendToPlugin" => Some(Self::SendToPlugin),
            _ => None,
        }
    }

    /// Returns the wire event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WillAppear => "willAppear",
            Self::WillDisappear => "willDisappear",
            Self::KeyDown => "keyDown",
            Self::KeyUp => "keyUp",
            Self::DidReceiveSettings => "didReceiveSettings",
            Self::DidReceiveGlobalSettings => "didReceiveGlobalSettings",
            Self::SendToPlugin => "sendToPlugin",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands sent to the Stream Deck host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    SetTitle,
    SetSettings,
    GetSettings,
    SetGlobalSettings,
    GetGlobalSettings,
    SendToPropertyInspector,
    ShowOk,
    ShowAlert,
}

impl CommandKind {
    /// Returns the wire event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetTitle => "setTitle",
            Self::SetSettings => "setSettings",
            Self::GetSettings => "getSettings",
            Self::SetGlobalSettings => "setGlobalSettings",
            Self::GetGlobalSettings => "getGlobalSettings",
            Self::SendToPropertyInspector => "sendToPropertyInspector",
            Self::ShowOk => "showOk",
            Self::ShowAlert => "showAlert",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Type-safe identifiers handed out by the Stream Deck host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name logged in place of an action identifier the host left blank.
pub const EMPTY_ACTION_PLACEHOLDER: &str = "EmptyDeckAction";

/// Identifier of a registered action.
///
/// Matches the action `UUID` declared in the plugin manifest
/// (e.g., "com.elgato.counter.action"). Stable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Creates a new ActionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the host sent no identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a name suitable for logging, substituting a placeholder
    /// for blank identifiers.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.0.is_empty() {
            EMPTY_ACTION_PLACEHOLDER
        } else {
            &self.0
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ActionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ActionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque token identifying one placement of an action on a device.
///
/// Supplied by the host with every event and echoed back on every
/// command that targets that placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(String);

impl Context {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Context {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of a physical device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_id_display_name_substitutes_placeholder() {
        assert_eq!(ActionId::new("").display_name(), EMPTY_ACTION_PLACEHOLDER);
        assert_eq!(ActionId::new("com.a.b").display_name(), "com.a.b");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&Context::new("CTX1")).unwrap();
        assert_eq!(json, "\"CTX1\"");

        let id: ActionId = serde_json::from_str("\"com.a.b\"").unwrap();
        assert_eq!(id.as_str(), "com.a.b");
    }
}

//! Event-specific sub-payloads carried in the envelope's `payload` field.
//!
//! Every field defaults so that partial payloads still decode; the
//! settings blob is left as raw JSON for the action to interpret.

use deckhand_core::Coordinates;
use serde::{Deserialize, Serialize};

/// Sub-payload of `keyDown` / `keyUp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPayload {
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub coordinates: Coordinates,
    /// Only present when the user pressed a multi-state action in a multi action
    #[serde(default)]
    pub user_desired_state: i64,
    #[serde(default)]
    pub is_in_multi_action: bool,
}

/// Sub-payload of `willAppear` / `willDisappear`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearPayload {
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub state: i64,
    #[serde(default)]
    pub is_in_multi_action: bool,
}

/// Sub-payload of `didReceiveSettings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub is_in_multi_action: bool,
}

/// Sub-payload of `didReceiveGlobalSettings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettingsPayload {
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_payload_parsing() {
        let json = r#"{
            "settings": {"count": 5},
            "coordinates": {"column": 3, "row": 1},
            "userDesiredState": 1,
            "isInMultiAction": true
        }"#;

        let payload: KeyPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.settings, json!({"count": 5}));
        assert_eq!(payload.coordinates, Coordinates::new(3, 1));
        assert_eq!(payload.user_desired_state, 1);
        assert!(payload.is_in_multi_action);
    }

    #[test]
    fn test_appear_payload_parsing() {
        let json = r#"{
            "settings": {},
            "coordinates": {"column": 0, "row": 2},
            "state": 1,
            "isInMultiAction": false
        }"#;

        let payload: AppearPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.settings, json!({}));
        assert_eq!(payload.coordinates, Coordinates::new(0, 2));
        assert_eq!(payload.state, 1);
        assert!(!payload.is_in_multi_action);
    }

    #[test]
    fn test_settings_payload_parsing() {
        let json = r#"{
            "settings": {"label": "hi"},
            "coordinates": {"column": 4, "row": 0},
            "isInMultiAction": true
        }"#;

        let payload: SettingsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.settings, json!({"label": "hi"}));
        assert_eq!(payload.coordinates, Coordinates::new(4, 0));
        assert!(payload.is_in_multi_action);
    }

    #[test]
    fn test_global_settings_payload_parsing() {
        let payload: GlobalSettingsPayload =
            serde_json::from_str(r#"{"settings": {"theme": "dark"}}"#).unwrap();
        assert_eq!(payload.settings, json!({"theme": "dark"}));
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let payload: KeyPayload = serde_json::from_str(r#"{"isInMultiAction": true}"#).unwrap();
        assert!(payload.settings.is_null());
        assert_eq!(payload.coordinates, Coordinates::default());
        assert_eq!(payload.user_desired_state, 0);
        assert!(payload.is_in_multi_action);
    }
}

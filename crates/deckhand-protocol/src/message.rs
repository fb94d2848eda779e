//! Protocol message envelopes exchanged with the Stream Deck host.

use deckhand_core::{ActionId, Context, DeviceId, Target};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::event::{CommandKind, EventKind};

/// One-shot registration handshake, sent right after the socket opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Registration event name supplied by the host at launch
    pub event: String,

    /// Plugin UUID supplied by the host at launch
    pub uuid: String,
}

impl Registration {
    pub fn new(event: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            uuid: uuid.into(),
        }
    }
}

/// Inbound message from the host.
///
/// Every field is optional on the wire so that a structurally valid JSON
/// object always decodes; routing decides what to do with blanks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Identifier of the action the event is addressed to
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: ActionId,

    /// Raw event name (see [`EventKind`])
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,

    /// Placement the event originates from
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: Context,

    /// Device the event originates from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceId>,

    /// Event-specific sub-payload, kept undecoded
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Decodes an envelope from a raw text message.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parses the event kind, `None` for names outside the routed set.
    pub fn event_kind(&self) -> Option<EventKind> {
        EventKind::from_event_name(&self.event)
    }

    /// Decodes the sub-payload, falling back to its zero value.
    ///
    /// A missing or mistyped sub-payload never aborts dispatch.
    pub fn payload_or_default<T: DeserializeOwned + Default>(&self) -> T {
        T::deserialize(&self.payload).unwrap_or_default()
    }
}

/// Decodes an explicit `null` as the field's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outbound command to the host.
///
/// Serializes with fields in wire order: `action`, `event`, `context`,
/// `payload`, omitting the optional ones when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionId>,

    pub event: CommandKind,

    pub context: Context,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl OutboundCommand {
    /// Creates a command with neither action nor payload.
    pub fn new(event: CommandKind, context: Context) -> Self {
        Self {
            action: None,
            event,
            context,
            payload: None,
        }
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attaches the addressed action identifier.
    #[must_use]
    pub fn with_action(mut self, action: ActionId) -> Self {
        self.action = Some(action);
        self
    }

    /// Creates a `setTitle` command.
    pub fn set_title(context: Context, title: &str, target: Target) -> Self {
        let payload = json!({"title": title, "target": target.as_u8()});
        Self::new(CommandKind::SetTitle, context).with_payload(payload)
    }

    /// Creates a `setSettings` command.
    pub fn set_settings(context: Context, settings: serde_json::Value) -> Self {
        Self::new(CommandKind::SetSettings, context).with_payload(settings)
    }

    /// Creates a `getSettings` command.
    pub fn get_settings(context: Context) -> Self {
        Self::new(CommandKind::GetSettings, context)
    }

    /// Creates a `setGlobalSettings` command.
    pub fn set_global_settings(context: Context, settings: serde_json::Value) -> Self {
        Self::new(CommandKind::SetGlobalSettings, context).with_payload(settings)
    }

    /// Creates a `getGlobalSettings` command.
    pub fn get_global_settings(context: Context) -> Self {
        Self::new(CommandKind::GetGlobalSettings, context)
    }

    /// Creates a `showOk` command.
    pub fn show_ok(context: Context) -> Self {
        Self::new(CommandKind::ShowOk, context)
    }

    /// Creates a `showAlert` command.
    pub fn show_alert(context: Context) -> Self {
        Self::new(CommandKind::ShowAlert, context)
    }

    /// Creates a `sendToPropertyInspector` command.
    pub fn send_to_property_inspector(
        context: Context,
        action: ActionId,
        data: serde_json::Value,
    ) -> Self {
        Self::new(CommandKind::SendToPropertyInspector, context)
            .with_action(action)
            .with_payload(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::KeyPayload;
    use serde_json::json;

    #[test]
    fn test_set_title_wire_format() {
        let cmd = OutboundCommand::set_title(Context::new("abc"), "5", Target::default());
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(
            json,
            r#"{"event":"setTitle","context":"abc","payload":{"title":"5","target":0}}"#
        );
    }

    #[test]
    fn test_payloadless_command_omits_payload_and_action() {
        let json = serde_json::to_string(&OutboundCommand::show_ok(Context::new("c"))).unwrap();
        assert_eq!(json, r#"{"event":"showOk","context":"c"}"#);
    }

    #[test]
    fn test_send_to_property_inspector_includes_action() {
        let cmd = OutboundCommand::send_to_property_inspector(
            Context::new("c"),
            ActionId::new("com.a.b"),
            json!({"count": 1}),
        );
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(
            json,
            r#"{"action":"com.a.b","event":"sendToPropertyInspector","context":"c","payload":{"count":1}}"#
        );
    }

    #[test]
    fn test_registration_wire_format() {
        let json = serde_json::to_string(&Registration::new("registerPlugin", "UUID-1")).unwrap();
        assert_eq!(json, r#"{"event":"registerPlugin","uuid":"UUID-1"}"#);
    }

    #[test]
    fn test_envelope_decode() {
        let text = r#"{
            "action": "com.a.b",
            "event": "keyUp",
            "context": "CTX1",
            "device": "DEV1",
            "payload": {"settings": {}, "coordinates": {"column": 1, "row": 2}}
        }"#;

        let envelope = Envelope::decode(text).unwrap();
        assert_eq!(envelope.action.as_str(), "com.a.b");
        assert_eq!(envelope.event_kind(), Some(EventKind::KeyUp));
        assert_eq!(envelope.context.as_str(), "CTX1");
        assert_eq!(envelope.device.as_ref().map(DeviceId::as_str), Some("DEV1"));
    }

    #[test]
    fn test_envelope_decode_rejects_invalid_json() {
        assert!(Envelope::decode("not json").is_err());
    }

    #[test]
    fn test_envelope_missing_fields_default() {
        let envelope = Envelope::decode("{}").unwrap();
        assert!(envelope.action.is_empty());
        assert_eq!(envelope.event_kind(), None);
        assert!(envelope.payload.is_null());
    }

    #[test]
    fn test_envelope_null_fields_decode_as_empty() {
        let envelope = Envelope::decode(
            r#"{"action":null,"event":null,"context":null,"device":null,"payload":null}"#,
        )
        .unwrap();
        assert!(envelope.action.is_empty());
        assert_eq!(envelope.action.display_name(), "EmptyDeckAction");
        assert_eq!(envelope.event, "");
        assert_eq!(envelope.context.as_str(), "");
        assert!(envelope.device.is_none());
    }

    #[test]
    fn test_envelope_mistyped_action_still_rejected() {
        assert!(Envelope::decode(r#"{"action":5,"event":"keyUp","context":"c"}"#).is_err());
    }

    #[test]
    fn test_set_title_payload_targets() {
        for (target, wire) in [
            (Target::HardwareAndSoftware, 0),
            (Target::HardwareOnly, 1),
            (Target::SoftwareOnly, 2),
        ] {
            let cmd = OutboundCommand::set_title(Context::new("c"), "t", target);
            assert_eq!(cmd.payload, Some(json!({"title": "t", "target": wire})));
        }
    }

    #[test]
    fn test_payload_or_default_tolerates_mistyped_payload() {
        let envelope = Envelope::decode(
            r#"{"action":"a","event":"keyDown","context":"c","payload":"nonsense"}"#,
        )
        .unwrap();
        let payload: KeyPayload = envelope.payload_or_default();
        assert_eq!(payload, KeyPayload::default());
    }
}

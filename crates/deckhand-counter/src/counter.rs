//! The counter action and its property inspector protocol.

use anyhow::{bail, Context as _};
use deckhand::{
    async_trait, Action, ActionId, AppearPayload, CommandSender, Context, HandlerResult,
    KeyPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Identifier declared in the plugin manifest.
pub const COUNTER_ACTION_ID: &str = "com.deckhand.counter.action";

/// Field of a property inspector message naming the request.
const SELECTOR_FIELD: &str = "property_inspector";

// ============================================================================
// State
// ============================================================================

/// Persisted state, stored as the placement's settings: `{"count": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    #[serde(default)]
    pub count: i64,
}

impl CounterState {
    /// Applies the fields of `fields` that belong to the state.
    ///
    /// Unrelated fields are ignored; a `count` that is not an integer is
    /// an error and leaves the state untouched.
    fn merge(&mut self, fields: &Map<String, Value>) -> anyhow::Result<()> {
        if let Some(count) = fields.get("count") {
            self.count = serde_json::from_value(count.clone())
                .with_context(|| format!("count must be an integer, got {count}"))?;
        }
        Ok(())
    }
}

// ============================================================================
// Property inspector requests
// ============================================================================

/// A request from the property inspector, selected by its
/// `property_inspector` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectorRequest {
    /// The inspector opened and wants the current state
    Connected,
    /// The inspector edited the state
    UpdateSettings,
    /// Anything else; ignored
    Other(String),
}

impl InspectorRequest {
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "propertyInspectorConnected" => Self::Connected,
            "updateSettings" => Self::UpdateSettings,
            other => Self::Other(other.to_string()),
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// Counts key releases.
///
/// One instance serves every placement of the action, so all keys showing
/// the counter share a single count.
#[derive(Debug, Default)]
pub struct CounterAction {
    state: CounterState,
}

impl CounterAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a given count.
    pub fn with_count(count: i64) -> Self {
        Self {
            state: CounterState { count },
        }
    }

    pub fn count(&self) -> i64 {
        self.state.count
    }

    fn action_id() -> ActionId {
        ActionId::new(COUNTER_ACTION_ID)
    }

    async fn show_count(&self, context: &Context, sender: &mut CommandSender) -> HandlerResult {
        sender
            .set_title(context, &self.state.count.to_string())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Action for CounterAction {
    fn id(&self) -> &str {
        COUNTER_ACTION_ID
    }

    async fn will_appear(
        &mut self,
        context: &Context,
        sender: &mut CommandSender,
        payload: AppearPayload,
    ) -> HandlerResult {
        if let Some(fields) = payload.settings.as_object() {
            self.state.merge(fields)?;
        }
        self.show_count(context, sender).await
    }

    async fn key_up(
        &mut self,
        context: &Context,
        sender: &mut CommandSender,
        _payload: KeyPayload,
    ) -> HandlerResult {
        self.state.count = self.state.count.saturating_add(1);
        debug!(context = %context, count = self.state.count, "Counter incremented");

        sender.set_settings(context, &self.state).await?;
        self.show_count(context, sender).await
    }

    async fn property_inspector_message(
        &mut self,
        context: &Context,
        sender: &mut CommandSender,
        payload: Value,
    ) -> HandlerResult {
        let fields = match payload.as_object() {
            Some(fields) if !fields.is_empty() => fields,
            _ => bail!("property inspector message carried no fields"),
        };

        let selector = fields
            .get(SELECTOR_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default();
        if selector.is_empty() {
            bail!("{} was empty", SELECTOR_FIELD);
        }

        match InspectorRequest::from_selector(selector) {
            InspectorRequest::Connected => {
                sender
                    .send_to_property_inspector(context, &Self::action_id(), &self.state)
                    .await?;
            }
            InspectorRequest::UpdateSettings => {
                self.state.merge(fields)?;
                self.show_count(context, sender).await?;
                sender.set_settings(context, &self.state).await?;
            }
            InspectorRequest::Other(selector) => {
                debug!(selector = %selector, "Ignoring property inspector request");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_serializes_as_settings() {
        let state = CounterState { count: 6 };
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"count":6}"#);
    }

    #[test]
    fn test_merge_ignores_unrelated_fields() {
        let mut state = CounterState { count: 3 };
        let fields = json!({"property_inspector": "updateSettings", "label": "x"});
        state.merge(fields.as_object().unwrap()).unwrap();
        assert_eq!(state.count, 3);
    }

    #[test]
    fn test_merge_rejects_non_integer_count() {
        let mut state = CounterState { count: 3 };
        let fields = json!({"count": "many"});
        assert!(state.merge(fields.as_object().unwrap()).is_err());
        assert_eq!(state.count, 3);
    }

    #[test]
    fn test_inspector_selectors() {
        assert_eq!(
            InspectorRequest::from_selector("propertyInspectorConnected"),
            InspectorRequest::Connected
        );
        assert_eq!(
            InspectorRequest::from_selector("updateSettings"),
            InspectorRequest::UpdateSettings
        );
        assert_eq!(
            InspectorRequest::from_selector("reset"),
            InspectorRequest::Other("reset".to_string())
        );
    }

    #[test]
    fn test_with_count() {
        let action = CounterAction::with_count(5);
        assert_eq!(action.count(), 5);
        assert_eq!(action.id(), COUNTER_ACTION_ID);
        assert_eq!(CounterAction::new().count(), 0);
    }
}

//! Action registry keyed by action identifier.
//!
//! Populated while the plugin is being built, then moved into the
//! [`crate::EventDispatcher`], which only exposes lookups. Ownership is
//! the freeze: once the dispatcher runs nothing can register, so no
//! locking is needed.

use std::collections::HashMap;

use deckhand_core::{ActionId, DomainError, DomainResult};
use tracing::debug;

use crate::action::Action;

/// Mapping from action identifier to its handler.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionId, Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its own identifier.
    ///
    /// # Errors
    ///
    /// - `DomainError::DuplicateAction` if the identifier is taken. The
    ///   existing registration is kept.
    pub fn register<A: Action + 'static>(&mut self, action: A) -> DomainResult<()> {
        self.register_boxed(Box::new(action))
    }

    /// Registers an already boxed action.
    pub fn register_boxed(&mut self, action: Box<dyn Action>) -> DomainResult<()> {
        let action_id = ActionId::new(action.id());

        if self.actions.contains_key(&action_id) {
            return Err(DomainError::DuplicateAction { action_id });
        }

        debug!(action_id = %action_id, "Action registered");
        self.actions.insert(action_id, action);
        Ok(())
    }

    /// Registers actions in order, stopping at the first duplicate.
    ///
    /// Actions registered before the duplicate stay registered.
    pub fn register_all<I>(&mut self, actions: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = Box<dyn Action>>,
    {
        for action in actions {
            self.register_boxed(action)?;
        }
        Ok(())
    }

    /// Looks up the handler for an identifier.
    pub fn get_mut(&mut self, action_id: &ActionId) -> Option<&mut Box<dyn Action>> {
        self.actions.get_mut(action_id)
    }

    pub fn contains(&self, action_id: &ActionId) -> bool {
        self.actions.contains_key(action_id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&ActionId> {
        let mut ids: Vec<&ActionId> = self.actions.keys().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        id: &'static str,
    }

    #[async_trait::async_trait]
    impl Action for Named {
        fn id(&self) -> &str {
            self.id
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ActionRegistry::new();
        registry.register(Named { id: "com.a.one" }).unwrap();
        registry.register(Named { id: "com.a.two" }).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&ActionId::new("com.a.one")));
        assert!(registry.get_mut(&ActionId::new("com.a.two")).is_some());
        assert!(registry.get_mut(&ActionId::new("com.a.three")).is_none());
    }

    #[test]
    fn test_duplicate_keeps_first_registrant() {
        let mut registry = ActionRegistry::new();
        registry.register(Named { id: "com.a.one" }).unwrap();

        let err = registry
            .register(Named { id: "com.a.one" })
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateAction {
                action_id: ActionId::new("com.a.one")
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_all_stops_at_duplicate() {
        let mut registry = ActionRegistry::new();
        let actions: Vec<Box<dyn Action>> = vec![
            Box::new(Named { id: "com.a.one" }),
            Box::new(Named { id: "com.a.one" }),
            Box::new(Named { id: "com.a.three" }),
        ];

        assert!(registry.register_all(actions).is_err());
        assert_eq!(registry.ids(), vec![&ActionId::new("com.a.one")]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ActionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.ids().is_empty());
    }
}

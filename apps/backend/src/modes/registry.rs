//! Authoritative mapping from game-mode identifier to handler capability.
//!
//! The registry is populated during startup, before any request traffic,
//! and is immutable afterwards; `resolve` and `modes` take `&self` and are
//! safe for concurrent readers behind an `Arc` with no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::ModeHandler;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Identifier already registered. Fatal during startup.
    #[error("duplicate game mode '{0}'")]
    DuplicateMode(String),
    /// No handler registered under the identifier.
    #[error("unknown game mode '{0}'")]
    UnknownMode(String),
}

#[derive(Default)]
pub struct GameModeRegistry {
    // Insertion order drives `modes`; the index makes `resolve` O(1).
    handlers: Vec<Arc<dyn ModeHandler>>,
    index: HashMap<String, usize>,
}

impl GameModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mode under its handler-declared name.
    ///
    /// A duplicate name fails with `DuplicateMode` and leaves the registry
    /// exactly as it was before the call.
    pub fn register(&mut self, handler: Arc<dyn ModeHandler>) -> Result<(), RegistryError> {
        let name = handler.name();
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateMode(name.to_string()));
        }
        self.index.insert(name.to_string(), self.handlers.len());
        self.handlers.push(handler);
        Ok(())
    }

    /// Look up the handler for an identifier.
    pub fn resolve(&self, id: &str) -> Result<&Arc<dyn ModeHandler>, RegistryError> {
        self.index
            .get(id)
            .map(|&i| &self.handlers[i])
            .ok_or_else(|| RegistryError::UnknownMode(id.to_string()))
    }

    /// Registered identifiers in insertion order. Lazy and restartable.
    pub fn modes(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }

    /// Registered handlers in insertion order, for discovery endpoints.
    pub fn entries(&self) -> impl Iterator<Item = &Arc<dyn ModeHandler>> + '_ {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for GameModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameModeRegistry")
            .field("modes", &self.modes().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod registry_tests {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::auth::AuthContext;
    use crate::modes::{HandlerError, MappedInput, MappingError};

    struct NamedHandler(&'static str);

    #[async_trait]
    impl ModeHandler for NamedHandler {
        fn name(&self) -> &'static str {
            self.0
        }

        fn version(&self) -> &'static str {
            "test"
        }

        fn map_payload(&self, payload: Value) -> Result<MappedInput, MappingError> {
            let _ = payload;
            unimplemented!("not exercised by registry tests")
        }

        async fn invoke(
            &self,
            _ctx: &AuthContext,
            _input: MappedInput,
        ) -> Result<Value, HandlerError> {
            unimplemented!("not exercised by registry tests")
        }
    }

    #[test]
    fn resolve_returns_the_registered_handler() {
        let mut registry = GameModeRegistry::new();
        let handler: Arc<dyn ModeHandler> = Arc::new(NamedHandler("blackjack"));
        registry.register(handler.clone()).unwrap();

        let resolved = registry.resolve("blackjack").unwrap();
        assert!(Arc::ptr_eq(resolved, &handler));
    }

    #[test]
    fn unregistered_identifier_is_unknown() {
        let registry = GameModeRegistry::new();
        match registry.resolve("poker") {
            Err(e) => assert_eq!(e, RegistryError::UnknownMode("poker".to_string())),
            Ok(_) => panic!("resolve of an unregistered identifier must fail"),
        }
    }

    #[test]
    fn duplicate_registration_fails_and_leaves_registry_unchanged() {
        let mut registry = GameModeRegistry::new();
        let first: Arc<dyn ModeHandler> = Arc::new(NamedHandler("blackjack"));
        let second: Arc<dyn ModeHandler> = Arc::new(NamedHandler("blackjack"));

        registry.register(first.clone()).unwrap();
        let err = registry.register(second).unwrap_err();

        assert_eq!(err, RegistryError::DuplicateMode("blackjack".to_string()));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(registry.resolve("blackjack").unwrap(), &first));
    }

    #[test]
    fn modes_preserve_insertion_order_and_restart() {
        let mut registry = GameModeRegistry::new();
        for name in ["blackjack", "hearts", "cribbage"] {
            registry.register(Arc::new(NamedHandler(name))).unwrap();
        }

        let first_pass: Vec<&str> = registry.modes().collect();
        assert_eq!(first_pass, vec!["blackjack", "hearts", "cribbage"]);

        // The enumeration is restartable: a fresh call yields the same walk.
        let second_pass: Vec<&str> = registry.modes().collect();
        assert_eq!(first_pass, second_pass);
    }
}

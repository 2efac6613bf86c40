use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::dispatch::Dispatcher;
use crate::modes::registry::GameModeRegistry;

/// Application state containing shared resources.
///
/// Constructed explicitly at startup and injected via `web::Data`; there
/// is no process-global registry. The registry is immutable once the state
/// is built.
#[derive(Clone)]
pub struct AppState {
    /// Shared game-mode registry
    pub registry: Arc<GameModeRegistry>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Request dispatcher; stateless between requests
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create a new AppState over a fully registered registry.
    pub fn new(registry: Arc<GameModeRegistry>, security: SecurityConfig) -> Self {
        let dispatcher = Dispatcher::new(registry.clone(), security.clone());
        Self {
            registry,
            security,
            dispatcher,
        }
    }
}

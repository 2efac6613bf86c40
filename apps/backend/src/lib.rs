#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod modes;
pub mod routes;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::context::AuthContext;
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use dispatch::{ActionRequest, ActionResponse, DispatchError, Dispatcher, Stage};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::validated_json::ValidatedJson;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use modes::registry::{GameModeRegistry, RegistryError};
pub use modes::{GameMode, ModeHandler};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::test_logging::init();
}

//! Startup configuration for supported game modes.
//!
//! The mode list comes from `PARLOR_GAME_MODES` (comma-separated, default
//! `blackjack`). Every name must match a built-in mode factory; an unknown
//! or duplicate name aborts startup rather than running with an
//! inconsistent registry.

use std::sync::Arc;

use crate::error::AppError;
use crate::modes::blackjack::BlackjackMode;
use crate::modes::registry::GameModeRegistry;
use crate::modes::{erase, ModeHandler};

pub const GAME_MODES_ENV: &str = "PARLOR_GAME_MODES";
const DEFAULT_MODES: &str = "blackjack";

/// Built-in mode factory table. Add future game modes here.
fn builtin(name: &str) -> Option<Arc<dyn ModeHandler>> {
    match name {
        BlackjackMode::NAME => Some(erase(BlackjackMode)),
        _ => None,
    }
}

/// Parse a comma-separated mode list into a fully registered registry.
pub fn registry_from_list(list: &str) -> Result<GameModeRegistry, AppError> {
    let mut registry = GameModeRegistry::new();

    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let handler = builtin(name).ok_or_else(|| {
            AppError::config(format!("unknown game mode '{name}' in {GAME_MODES_ENV}"))
        })?;
        registry
            .register(handler)
            .map_err(|e| AppError::config(format!("{GAME_MODES_ENV}: {e}")))?;
    }

    if registry.is_empty() {
        return Err(AppError::config(format!(
            "{GAME_MODES_ENV} must name at least one game mode"
        )));
    }

    Ok(registry)
}

/// Build the registry from the environment, defaulting to blackjack.
pub fn load_registry() -> Result<GameModeRegistry, AppError> {
    let list = std::env::var(GAME_MODES_ENV).unwrap_or_else(|_| DEFAULT_MODES.to_string());
    registry_from_list(&list)
}

//! Game-mode capabilities.
//!
//! How to add a game mode
//!
//! 1) Implement `GameMode` for your type in its own module.
//! 2) Add a factory entry in `crate::config::modes::builtin` with a stable
//!    name.
//! 3) Keep names stable; avoid side effects in constructors.
//!
//! A `GameMode` is the typed capability; the registry stores the
//! object-safe `ModeHandler` form produced by [`erase`].

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::auth::AuthContext;
use crate::errors::DomainError;

pub mod blackjack;
pub mod registry;

/// Typed per-mode capability. `Input` is the domain shape the wire payload
/// must map into; `Output` is serialized into the response body.
#[async_trait]
pub trait GameMode: Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;
    type Output: Serialize + Send;

    /// Stable mode identifier, unique across the registry.
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str {
        "1"
    }

    async fn handle(
        &self,
        ctx: &AuthContext,
        input: Self::Input,
    ) -> Result<Self::Output, DomainError>;
}

/// Payload-mapping failure: the wire payload does not match the mode's
/// expected input shape.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct MappingError {
    pub detail: String,
}

/// Failure from handler invocation. Domain errors carry the handler's
/// declared kind; anything else is surfaced as internal without detail
/// reaching the caller.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("internal handler failure: {0}")]
    Internal(String),
    /// Handler output could not be serialized into the wire response. The
    /// dispatcher attributes this to the response-mapping stage, not the
    /// handler itself.
    #[error("response serialization failed: {0}")]
    ResponseSerialization(String),
}

/// A mode input after the payload-mapping stage; opaque to the dispatcher.
pub struct MappedInput(Box<dyn Any + Send>);

impl std::fmt::Debug for MappedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedInput").finish_non_exhaustive()
    }
}

/// Object-safe handler form stored in the registry.
///
/// Payload mapping and invocation are split so the two pipeline stages
/// stay separately observable and separately fallible.
#[async_trait]
pub trait ModeHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    /// Convert the wire payload into the mode's typed input.
    fn map_payload(&self, payload: Value) -> Result<MappedInput, MappingError>;

    /// Execute the mode with a previously mapped input.
    async fn invoke(&self, ctx: &AuthContext, input: MappedInput) -> Result<Value, HandlerError>;
}

/// Erase a typed `GameMode` into the registry's handler form.
pub fn erase<M: GameMode>(mode: M) -> Arc<dyn ModeHandler> {
    Arc::new(Erased(mode))
}

struct Erased<M>(M);

#[async_trait]
impl<M: GameMode> ModeHandler for Erased<M> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn version(&self) -> &'static str {
        self.0.version()
    }

    fn map_payload(&self, payload: Value) -> Result<MappedInput, MappingError> {
        let input: M::Input = serde_json::from_value(payload).map_err(|e| MappingError {
            detail: format!("payload does not match '{}' input: {e}", self.0.name()),
        })?;
        Ok(MappedInput(Box::new(input)))
    }

    async fn invoke(&self, ctx: &AuthContext, input: MappedInput) -> Result<Value, HandlerError> {
        // The only producer of MappedInput for this handler is map_payload
        // above, so a downcast failure means caller confusion between modes.
        let input = input.0.downcast::<M::Input>().map_err(|_| {
            HandlerError::Internal(format!(
                "mapped input does not belong to mode '{}'",
                self.0.name()
            ))
        })?;
        let output = self.0.handle(ctx, *input).await?;
        serde_json::to_value(output).map_err(|e| {
            HandlerError::ResponseSerialization(format!(
                "failed to serialize '{}' output: {e}",
                self.0.name()
            ))
        })
    }
}

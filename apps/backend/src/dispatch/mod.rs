//! Request dispatcher: the fixed pipeline every inbound action runs through.
//!
//! Stage order is strict and short-circuits on the first failure:
//! authentication → authorization → mode resolution → payload mapping →
//! handler invocation → response mapping. A failure carries the stage it
//! occurred in; nothing is retried here, retries are the caller's problem.
//!
//! The dispatcher holds no mutable state between requests; the registry it
//! shares is immutable once startup registration has finished.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::jwt::verify_access_token;
use crate::auth::AuthContext;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::modes::registry::{GameModeRegistry, RegistryError};
use crate::modes::HandlerError;
use crate::state::security_config::SecurityConfig;

/// Wire-level action request.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "modeId")]
    pub mode_id: String,
    /// Opaque payload handed to the resolved mode's mapping stage.
    #[serde(default)]
    pub payload: Value,
}

/// Wire-level success response.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub result: Value,
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authentication,
    Authorization,
    ModeResolution,
    PayloadMapping,
    Handler,
    ResponseMapping,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Authentication => "authentication",
            Stage::Authorization => "authorization",
            Stage::ModeResolution => "mode_resolution",
            Stage::PayloadMapping => "payload_mapping",
            Stage::Handler => "handler",
            Stage::ResponseMapping => "response_mapping",
        }
    }
}

/// A pipeline failure, recording the stage it occurred in.
#[derive(Debug, Error)]
#[error("dispatch failed during {}: {error}", .stage.as_str())]
pub struct DispatchError {
    pub stage: Stage,
    pub error: AppError,
}

impl DispatchError {
    fn at(stage: Stage) -> impl FnOnce(AppError) -> Self {
        move |error| Self { stage, error }
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        warn!(stage = e.stage.as_str(), error = %e.error, "dispatch failed");
        e.error
    }
}

/// Orchestrates the pipeline for every inbound action.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<GameModeRegistry>,
    security: SecurityConfig,
}

impl Dispatcher {
    pub fn new(registry: Arc<GameModeRegistry>, security: SecurityConfig) -> Self {
        Self { registry, security }
    }

    /// Run one request through the pipeline.
    ///
    /// `authorization` is the raw `Authorization` header value, if any;
    /// deriving the caller identity from it is the first stage, not the
    /// transport's job.
    pub async fn dispatch(
        &self,
        authorization: Option<&str>,
        request: ActionRequest,
    ) -> Result<ActionResponse, DispatchError> {
        // Stage 1: authentication
        let ctx = self
            .authenticate(authorization)
            .map_err(DispatchError::at(Stage::Authentication))?;
        debug!(sub = %ctx.sub, mode = %request.mode_id, "caller authenticated");

        // Stage 2: authorization
        if !ctx.may_access(&request.mode_id) {
            return Err(DispatchError::at(Stage::Authorization)(
                AppError::mode_not_allowed(&request.mode_id),
            ));
        }

        // Stage 3: mode resolution
        let handler = self.registry.resolve(&request.mode_id).map_err(|e| {
            DispatchError::at(Stage::ModeResolution)(match e {
                RegistryError::UnknownMode(mode) => AppError::unknown_mode(&mode),
                RegistryError::DuplicateMode(mode) => {
                    AppError::internal(format!("registry inconsistency for mode '{mode}'"))
                }
            })
        })?;

        // Stage 4: payload mapping
        let input = handler.map_payload(request.payload).map_err(|e| {
            DispatchError::at(Stage::PayloadMapping)(AppError::bad_request(
                ErrorCode::InvalidPayload,
                e.detail,
            ))
        })?;

        // Stage 5: handler invocation. Output serialization belongs to the
        // response-mapping stage even though the erased handler performs it.
        let output = handler.invoke(&ctx, input).await.map_err(|e| match e {
            HandlerError::Domain(domain) => {
                DispatchError::at(Stage::Handler)(AppError::from(domain))
            }
            HandlerError::Internal(detail) => {
                DispatchError::at(Stage::Handler)(AppError::internal(detail))
            }
            HandlerError::ResponseSerialization(detail) => {
                DispatchError::at(Stage::ResponseMapping)(AppError::internal(detail))
            }
        })?;

        // Stage 6: response mapping
        debug!(sub = %ctx.sub, mode = %request.mode_id, "action handled");
        Ok(ActionResponse { result: output })
    }

    fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, AppError> {
        let token = parse_bearer(authorization)?;
        let claims = verify_access_token(&token, &self.security)?;
        Ok(AuthContext::from(claims))
    }
}

/// Parse "Bearer <token>" out of an Authorization header value.
fn parse_bearer(header: Option<&str>) -> Result<String, AppError> {
    let value = header.ok_or_else(AppError::unauthorized_missing_bearer)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" || parts[1].is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(parts[1].to_string())
}

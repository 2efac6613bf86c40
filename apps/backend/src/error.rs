use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::errors::{DomainError, ErrorCode};
use crate::trace_ctx;

/// RFC 7807 problem-details body rendered for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Web-boundary error for the parlor backend.
///
/// Every pipeline stage failure is converted into one of these variants at
/// the dispatcher boundary; the `ResponseError` impl turns it into a
/// problem-details response with the matching HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code rendered into the response body.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::Conflict { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Detail string exposed to the caller. Internal and configuration
    /// failures never leak their detail; it goes to the log instead.
    fn public_detail(&self) -> String {
        match self {
            AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedMissingBearer,
            detail: "Missing or malformed Bearer token".to_string(),
        }
    }

    pub fn unauthorized_invalid_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedInvalidToken,
            detail: "Invalid access token".to_string(),
        }
    }

    pub fn unauthorized_expired_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::UnauthorizedExpiredToken,
            detail: "Access token expired".to_string(),
        }
    }

    pub fn mode_not_allowed(mode: &str) -> Self {
        Self::Forbidden {
            code: ErrorCode::ModeNotAllowed,
            detail: format!("Not allowed to act on game mode '{mode}'"),
        }
    }

    pub fn unknown_mode(mode: &str) -> Self {
        Self::NotFound {
            code: ErrorCode::UnknownMode,
            detail: format!("No game mode registered under '{mode}'"),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn conflict(code: ErrorCode, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::bad_request(ErrorCode::ValidationError, detail)
            }
            DomainError::Conflict(detail) => AppError::conflict(ErrorCode::Conflict, detail),
            DomainError::NotFound(detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DomainError::Infra(detail) => AppError::internal(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str().to_string();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            // The public body carries a generic detail for 5xx; the real
            // one is only logged.
            error!(trace_id = %trace_id, error = %self, "server error");
        }

        let problem_details = ProblemDetails {
            type_: format!("https://parlor.dev/errors/{code}"),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail: self.public_detail(),
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_error_taxonomy() {
        assert_eq!(
            AppError::unauthorized_missing_bearer().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::mode_not_allowed("blackjack").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::unknown_mode("poker").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request(ErrorCode::InvalidPayload, "bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::config("missing secret").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_error_kinds_map_to_declared_statuses_and_codes() {
        let cases = [
            (
                DomainError::validation("v"),
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
            ),
            (
                DomainError::conflict("c"),
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
            ),
            (
                DomainError::not_found("n"),
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
            ),
            (
                DomainError::infra("i"),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Internal,
            ),
        ];
        for (domain, status, code) in cases {
            let err = AppError::from(domain);
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::internal("secret connection string");
        assert_eq!(err.public_detail(), "Internal server error");
    }

    #[test]
    fn humanize_code_title_cases_words() {
        assert_eq!(AppError::humanize_code("UNKNOWN_MODE"), "Unknown Mode");
        assert_eq!(
            AppError::humanize_code("UNAUTHORIZED_MISSING_BEARER"),
            "Unauthorized Missing Bearer"
        );
    }
}

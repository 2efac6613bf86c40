//! Error codes for the parlor backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the parlor backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid access token
    UnauthorizedInvalidToken,
    /// Access token has expired
    UnauthorizedExpiredToken,

    // Authorization
    /// Caller may not act on the requested game mode
    ModeNotAllowed,

    // Mode resolution
    /// No game mode registered under the requested identifier
    UnknownMode,

    // Request / payload mapping
    /// General bad request error
    BadRequest,
    /// Payload does not match the mode's expected input shape
    InvalidPayload,
    /// Handler-declared validation failure
    ValidationError,

    // Business logic conflicts
    /// Handler-declared semantic conflict
    Conflict,
    /// Handler-declared missing resource
    NotFound,

    // System errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical wire string for this code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            ErrorCode::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            ErrorCode::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN",
            ErrorCode::ModeNotAllowed => "MODE_NOT_ALLOWED",
            ErrorCode::UnknownMode => "UNKNOWN_MODE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

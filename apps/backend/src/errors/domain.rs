//! Domain-level error type used by game-mode handlers.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, DomainError>` and the dispatcher converts to
//! `crate::error::AppError` using the provided `From` implementation,
//! so a handler's declared kind decides the outward status.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(String),
    /// Semantic conflict
    Conflict(String),
    /// Missing resource in domain terms
    NotFound(String),
    /// Infrastructure/operational failures
    Infra(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(d) => write!(f, "conflict: {d}"),
            DomainError::NotFound(d) => write!(f, "not found: {d}"),
            DomainError::Infra(d) => write!(f, "infra error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }
    pub fn infra(detail: impl Into<String>) -> Self {
        Self::Infra(detail.into())
    }
}

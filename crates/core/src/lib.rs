//! Shared primitives for all Rust crates in the OHS audit service.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;
mod field_errors;

use thiserror::Error;

pub use auth::UserIdentity;
pub use field_errors::{FieldErrors, NON_FIELD_KEY};

/// Result type used across the OHS audit crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Field-scoped input validation failure, safe to show to the user.
    #[error("validation error: {0}")]
    Validation(FieldErrors),

    /// Credential check failed. The message is deliberately generic.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation violates a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller has no authenticated session.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Outbound email could not be delivered; carries the transport error text.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Invalid runtime configuration detected at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a validation error carrying a single message for one field.
    #[must_use]
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for AppError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

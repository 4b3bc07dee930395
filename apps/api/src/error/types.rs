use ohs_audit_core::FieldErrors;
use serde::Serialize;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    errors: FieldErrors,
}

impl ErrorResponse {
    pub(super) fn new(errors: FieldErrors) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

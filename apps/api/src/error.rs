use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ohs_audit_core::{AppError, FieldErrors};
use tracing::{error, warn};

mod types;

pub use types::ErrorResponse;

/// Message shown for a request without an authenticated session.
pub const AUTHENTICATION_REQUIRED_MESSAGE: &str = "Authentication required.";

const NOT_FOUND_MESSAGE: &str = "Not found.";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(value: FieldErrors) -> Self {
        Self(AppError::Validation(value))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self.0 {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            AppError::Authentication(message) => {
                (StatusCode::BAD_REQUEST, FieldErrors::non_field(message))
            }
            AppError::NotFound(message) => {
                warn!(%message, "resource not found");
                (
                    StatusCode::NOT_FOUND,
                    FieldErrors::non_field(NOT_FOUND_MESSAGE),
                )
            }
            AppError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                FieldErrors::non_field(AUTHENTICATION_REQUIRED_MESSAGE),
            ),
            AppError::Conflict(message) => (StatusCode::CONFLICT, FieldErrors::non_field(message)),
            AppError::Delivery(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                FieldErrors::non_field(format!("Failed to send email: {message}")),
            ),
            AppError::Configuration(message) | AppError::Internal(message) => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FieldErrors::non_field(INTERNAL_ERROR_MESSAGE),
                )
            }
        };

        error_response(status, errors)
    }
}

/// Renders the `{success: false, errors}` envelope.
pub fn error_response(status: StatusCode, errors: FieldErrors) -> Response {
    (status, Json(ErrorResponse::new(errors))).into_response()
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use ohs_audit_core::AppError;

    use super::ApiError;

    #[test]
    fn statuses_follow_error_category() {
        let cases = [
            (
                AppError::field("to_email", "Enter a valid email address."),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Authentication("Invalid username or password.".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("audit '9' does not exist".to_owned()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Unauthorized("no session".to_owned()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Conflict("duplicate".to_owned()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Delivery("connection refused".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("pool closed".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError(error).into_response().status(), status);
        }
    }
}

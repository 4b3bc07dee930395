//! Session login, logout, and flash messages.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use ohs_audit_core::{AppError, AppResult, UserIdentity};
use tower_sessions::Session;

use crate::dto::MethodNotAllowedResponse;

mod flash;
mod login;
mod session;

pub use flash::{push_flash, take_flash};
pub use login::login_handler;
pub use session::{index_handler, logout_handler};

/// Session key holding the signed-in [`UserIdentity`].
pub const SESSION_USER_KEY: &str = "ohs_audit_user";

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// Landing page holding the login form.
pub const INDEX_PATH: &str = "/";

/// Reads the identity stored in the session, if any.
pub async fn current_identity(session: &Session) -> AppResult<Option<UserIdentity>> {
    session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))
}

/// Plain `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}

pub async fn method_not_allowed_handler() -> (StatusCode, Json<MethodNotAllowedResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowedResponse {
            detail: "Method not allowed.",
        }),
    )
}

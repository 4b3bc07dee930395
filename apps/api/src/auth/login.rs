use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use ohs_audit_application::LoginOutcome;
use ohs_audit_core::{AppError, FieldErrors, NON_FIELD_KEY};
use tower_sessions::Session;

use crate::dto::AuthResponse;
use crate::error::ApiResult;
use crate::extract::{CanonicalInput, is_ajax};
use crate::state::AppState;

use super::{DASHBOARD_PATH, INDEX_PATH, SESSION_USER_KEY, found, push_flash};

/// POST /login/ - Sign in with a username and password.
///
/// JSON and XHR callers get a JSON answer. Plain form posts are redirected:
/// to the dashboard on success, or back to the landing page with the
/// failure queued as a flash message.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    input: CanonicalInput,
) -> ApiResult<Response> {
    let respond_json = input.is_json || is_ajax(&headers);
    let username = input.fields.raw("username").unwrap_or_default();
    let password = input.fields.raw("password").unwrap_or_default();

    let login = state
        .auth_service
        .login(username, password)
        .await
        .and_then(LoginOutcome::into_identity);

    let rejection = match login {
        Ok(identity) => {
            session.cycle_id().await.map_err(|error| {
                AppError::Internal(format!("failed to rotate session id: {error}"))
            })?;
            session
                .insert(SESSION_USER_KEY, &identity)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to persist session identity: {error}"))
                })?;

            return Ok(if respond_json {
                Json(AuthResponse::redirect(DASHBOARD_PATH)).into_response()
            } else {
                found(DASHBOARD_PATH)
            });
        }
        Err(AppError::Authentication(message)) => {
            BTreeMap::from([(NON_FIELD_KEY.to_owned(), message)])
        }
        Err(AppError::Validation(errors)) => first_message_per_field(&errors),
        Err(error) => return Err(error.into()),
    };

    if respond_json {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::rejected(rejection)),
        )
            .into_response());
    }

    for message in rejection.values() {
        push_flash(&session, message).await?;
    }
    Ok(found(INDEX_PATH))
}

fn first_message_per_field(errors: &FieldErrors) -> BTreeMap<String, String> {
    errors
        .iter()
        .filter_map(|(field, messages)| {
            messages
                .first()
                .map(|message| (field.to_owned(), message.clone()))
        })
        .collect()
}

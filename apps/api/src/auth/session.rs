use std::collections::BTreeMap;

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use ohs_audit_core::{AppError, NON_FIELD_KEY};
use tower_sessions::Session;
use tracing::info;

use crate::dto::{AuthResponse, IndexResponse};
use crate::error::ApiResult;
use crate::extract::is_ajax;

use super::{INDEX_PATH, current_identity, found, push_flash, take_flash};

const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated.";

/// POST /logout/ - End the current session.
pub async fn logout_handler(headers: HeaderMap, session: Session) -> ApiResult<Response> {
    let respond_json = is_ajax(&headers);

    let Some(identity) = current_identity(&session).await? else {
        if respond_json {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(AuthResponse::rejected(BTreeMap::from([(
                    NON_FIELD_KEY.to_owned(),
                    NOT_AUTHENTICATED_MESSAGE.to_owned(),
                )]))),
            )
                .into_response());
        }

        push_flash(&session, NOT_AUTHENTICATED_MESSAGE).await?;
        return Ok(found(INDEX_PATH));
    };

    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;
    info!(user_id = identity.user_id(), "logout succeeded");

    Ok(if respond_json {
        Json(AuthResponse::redirect(INDEX_PATH)).into_response()
    } else {
        found(INDEX_PATH)
    })
}

/// GET / - Session state and pending flash messages for the login page.
pub async fn index_handler(session: Session) -> ApiResult<Json<IndexResponse>> {
    let identity = current_identity(&session).await?;
    let messages = take_flash(&session).await?;

    Ok(Json(IndexResponse {
        authenticated: identity.is_some(),
        username: identity.map(|identity| identity.username().to_owned()),
        messages,
    }))
}

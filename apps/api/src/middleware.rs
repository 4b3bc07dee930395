use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use ohs_audit_core::{AppError, FieldErrors};
use tower_sessions::Session;
use tracing::warn;
use url::Url;

use crate::auth::{INDEX_PATH, current_identity, found};
use crate::error::{ApiError, error_response};
use crate::extract::wants_json;
use crate::state::AppState;

const CROSS_ORIGIN_MESSAGE: &str = "Cross-origin request blocked.";

/// Rejects requests without a signed-in user.
///
/// Browsers are sent to the login page with the requested path in `next`;
/// API callers get a 401 envelope.
pub async fn require_auth(session: Session, mut request: Request, next: Next) -> Response {
    match current_identity(&session).await {
        Ok(Some(identity)) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Ok(None) if wants_json(request.headers()) => {
            ApiError(AppError::Unauthorized("authentication required".to_owned())).into_response()
        }
        Ok(None) => found(&login_location(&request)),
        Err(error) => ApiError(error).into_response(),
    }
}

/// Rejects state-changing requests that do not come from the public origin.
pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if is_state_changing_method(request.method())
        && !is_same_origin(request.headers(), &state.allowed_origin)
    {
        warn!(path = %request.uri().path(), "cross-origin mutation rejected");
        return error_response(
            StatusCode::FORBIDDEN,
            FieldErrors::non_field(CROSS_ORIGIN_MESSAGE),
        );
    }

    next.run(request).await
}

fn login_location(request: &Request) -> String {
    let target = request
        .uri()
        .path_and_query()
        .map_or("/", |value| value.as_str());
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{INDEX_PATH}?next={encoded}")
}

fn is_same_origin(headers: &HeaderMap, allowed_origin: &str) -> bool {
    let header_text = |name| headers.get(name).and_then(|value| value.to_str().ok());

    if header_text(header::HeaderName::from_static("sec-fetch-site")) == Some("cross-site") {
        return false;
    }

    if let Some(origin) = header_text(header::ORIGIN) {
        return origin == allowed_origin;
    }

    header_text(header::REFERER)
        .and_then(|referer| Url::parse(referer).ok())
        .is_some_and(|referer| referer.origin().ascii_serialization() == allowed_origin)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::is_same_origin;

    const ORIGIN: &str = "http://localhost:8000";

    #[test]
    fn matching_origin_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static(ORIGIN));
        assert!(is_same_origin(&headers, ORIGIN));
    }

    #[test]
    fn referer_host_prefix_is_not_enough() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost:8000.evil.test/reports/"),
        );
        assert!(!is_same_origin(&headers, ORIGIN));

        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost:8000/reports/1/"),
        );
        assert!(is_same_origin(&headers, ORIGIN));
    }

    #[test]
    fn missing_origin_and_referer_is_rejected() {
        assert!(!is_same_origin(&HeaderMap::new(), ORIGIN));
    }
}

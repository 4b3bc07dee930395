//! Request body normalization.
//!
//! Handlers never branch on the content type themselves: JSON and
//! form-encoded bodies are both turned into one [`FieldInput`] here.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use ohs_audit_core::{AppError, FieldErrors};
use ohs_audit_domain::FieldInput;
use serde_json::Value;

use crate::error::ApiError;

/// Message for a JSON-only endpoint receiving another content type.
pub const EXPECTED_JSON_MESSAGE: &str = "Expected JSON payload.";
/// Message for a body that does not decode as a JSON object.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload.";

/// Body of a JSON or form-encoded submission.
#[derive(Debug, Clone)]
pub struct CanonicalInput {
    pub fields: FieldInput,
    /// Whether the body was sent as JSON.
    pub is_json: bool,
}

impl<S> FromRequest<S> for CanonicalInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_body(request.headers());
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read request body: {error}")))?;

        let fields = if is_json {
            parse_json_object(&body)?
        } else {
            FieldInput::from_pairs(url::form_urlencoded::parse(&body).into_owned())
        };

        Ok(Self { fields, is_json })
    }
}

/// Body of a JSON-only submission.
#[derive(Debug, Clone)]
pub struct JsonInput(pub FieldInput);

impl<S> FromRequest<S> for JsonInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_body(request.headers()) {
            return Err(non_field_error(EXPECTED_JSON_MESSAGE));
        }

        let body = Bytes::from_request(request, state)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read request body: {error}")))?;

        Ok(Self(parse_json_object(&body)?))
    }
}

/// Numeric primary key taken from the last path parameter.
///
/// A segment that is not a number names no record, so it is rejected as
/// `NotFound` rather than as a malformed request.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|error| AppError::NotFound(format!("invalid path: {error}")))?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| AppError::NotFound(format!("'{raw}' is not a record id")).into())
    }
}

/// Returns whether the caller expects a JSON answer rather than a redirect.
///
/// JSON bodies, `X-Requested-With: XMLHttpRequest`, and clients that do not
/// accept HTML are all treated as API callers.
#[must_use]
pub fn wants_json(headers: &HeaderMap) -> bool {
    if has_json_body(headers) || is_xhr(headers) {
        return true;
    }

    let accepts_html = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));
    !accepts_html
}

/// Returns whether the request is an XHR or carries a JSON body.
#[must_use]
pub fn is_ajax(headers: &HeaderMap) -> bool {
    has_json_body(headers) || is_xhr(headers)
}

fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_json_object(body: &[u8]) -> Result<FieldInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FieldInput::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(FieldInput::from_json_object(&object)),
        _ => Err(non_field_error(INVALID_JSON_MESSAGE)),
    }
}

fn non_field_error(message: &str) -> ApiError {
    AppError::Validation(FieldErrors::non_field(message)).into()
}

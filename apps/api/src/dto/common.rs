use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Bare success acknowledgement.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of a request to an endpoint that only accepts `POST`.
#[derive(Debug, Serialize)]
pub struct MethodNotAllowedResponse {
    pub detail: &'static str,
}

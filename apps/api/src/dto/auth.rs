use std::collections::BTreeMap;

use serde::Serialize;

/// Login and logout answer for JSON callers.
///
/// Unlike the rest of the API, errors here carry one message per field
/// rather than a list.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl AuthResponse {
    #[must_use]
    pub fn redirect(location: &'static str) -> Self {
        Self {
            success: true,
            redirect: Some(location),
            errors: None,
        }
    }

    #[must_use]
    pub fn rejected(errors: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            redirect: None,
            errors: Some(errors),
        }
    }
}

/// Session state and pending messages for the landing page.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub messages: Vec<String>,
}

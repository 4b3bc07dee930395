use ohs_audit_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::input::INVALID_EMAIL;

const MAX_EMAIL_LENGTH: usize = 254;

/// Validated email address.
///
/// The address is trimmed but its case is kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Rejects whitespace, anything other than exactly one `@`, an empty local
    /// part, and a domain without a dot or with an empty label.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty()
            || trimmed.len() > MAX_EMAIL_LENGTH
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(invalid());
        };

        if local.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(invalid());
        }

        if domain.split('.').any(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

fn invalid() -> AppError {
    AppError::field("email", INVALID_EMAIL)
}

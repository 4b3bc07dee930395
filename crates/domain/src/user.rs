use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::input::check_required_text;

/// Maximum characters for a username.
pub const USERNAME_MAX_CHARS: usize = 150;

const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Stored login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stored primary key.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// PHC-formatted password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive accounts cannot sign in.
    pub is_active: bool,
}

/// Account before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    /// Unique login name.
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

impl NewUserAccount {
    /// Checks the username column.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_username(&self.username)
    }
}

/// Checks a username is present, short enough, and uses allowed characters.
pub fn validate_username(username: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_required_text(&mut errors, "username", username, USERNAME_MAX_CHARS);

    let allowed = |character: char| character.is_alphanumeric() || "@.+-_".contains(character);
    if !username.trim().is_empty() && !username.chars().all(allowed) {
        errors.add("username", INVALID_USERNAME);
    }

    errors.into_result(())
}

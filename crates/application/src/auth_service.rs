//! Credential checks and account management.
//!
//! Login answers with one generic message for an unknown username and for a
//! wrong password, so the response does not reveal which accounts exist. Only
//! a caller who already knows the password learns that an account is inactive.

use std::sync::Arc;

use ohs_audit_core::{AppError, AppResult, FieldErrors, UserIdentity};
use ohs_audit_domain::{NewUserAccount, UserAccount, UserId, validate_username};
use tracing::{info, warn};

use crate::UserRepository;

/// Message for a login without a username.
pub const MISSING_USERNAME_MESSAGE: &str = "Please enter your username.";
/// Message for a login without a password.
pub const MISSING_PASSWORD_MESSAGE: &str = "Please enter your password.";
/// Message for an unknown username or a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
/// Message for a correct password on a deactivated account.
pub const INACTIVE_ACCOUNT_MESSAGE: &str = "This account is inactive.";

/// Port for password hashing operations. Keeps the application free of direct
/// cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials are valid. The identity can be stored in the session.
    Authenticated(UserIdentity),
    /// Unknown username or wrong password.
    InvalidCredentials,
    /// Correct password for a deactivated account.
    Inactive,
}

impl LoginOutcome {
    /// User-facing message for a rejected attempt.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            Self::Authenticated(_) => None,
            Self::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            Self::Inactive => Some(INACTIVE_ACCOUNT_MESSAGE),
        }
    }

    /// Returns the identity, or an `Authentication` error carrying the
    /// rejection message.
    pub fn into_identity(self) -> AppResult<UserIdentity> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            rejected => Err(AppError::Authentication(
                rejected
                    .rejection_message()
                    .unwrap_or(INVALID_CREDENTIALS_MESSAGE)
                    .to_owned(),
            )),
        }
    }
}

/// Application service for authentication and account management.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            password_hasher,
        }
    }

    /// Checks a username and password.
    ///
    /// Missing fields are a `Validation` error carrying one message per field.
    /// The username is trimmed; the password is used as given.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let username = username.trim();

        let mut errors = FieldErrors::new();
        if username.is_empty() {
            errors.add("username", MISSING_USERNAME_MESSAGE);
        }
        if password.is_empty() {
            errors.add("password", MISSING_PASSWORD_MESSAGE);
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let Some(user) = self.users.find_user_by_username(username).await? else {
            // Hash anyway so unknown usernames take as long as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            warn!(username = %username, "login rejected: unknown username");
            return Ok(LoginOutcome::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Ok(LoginOutcome::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "login rejected: inactive account");
            return Ok(LoginOutcome::Inactive);
        }

        info!(user_id = %user.id, "login succeeded");
        Ok(LoginOutcome::Authenticated(UserIdentity::new(
            user.id.as_i64(),
            user.username,
        )))
    }

    /// Creates an active account with a hashed password.
    pub async fn create_user(&self, username: &str, password: &str) -> AppResult<UserAccount> {
        let username = username.trim();
        validate_username(username)?;
        if password.is_empty() {
            return Err(AppError::field("password", MISSING_PASSWORD_MESSAGE));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = self
            .users
            .create_user(NewUserAccount {
                username: username.to_owned(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "user account created");
        Ok(user)
    }

    /// Activates or deactivates an account by username.
    pub async fn set_active(&self, username: &str, is_active: bool) -> AppResult<UserId> {
        let user = self
            .users
            .find_user_by_username(username.trim())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("user '{}' does not exist", username.trim()))
            })?;

        self.users.set_user_active(user.id, is_active).await?;
        info!(user_id = %user.id, is_active, "user account activation changed");
        Ok(user.id)
    }
}

use async_trait::async_trait;

use ohs_audit_core::AppResult;
use ohs_audit_domain::{NewUserAccount, UserAccount, UserId};

/// Repository port for login accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account. A taken username is a `Conflict`.
    async fn create_user(&self, user: NewUserAccount) -> AppResult<UserAccount>;

    /// Returns one account by key.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserAccount>>;

    /// Returns the account with exactly this username.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserAccount>>;

    /// Lists every account ordered by username.
    async fn list_users(&self) -> AppResult<Vec<UserAccount>>;

    /// Replaces the password hash of an account.
    async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> AppResult<()>;

    /// Activates or deactivates an account.
    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<()>;

    /// Deletes an account.
    async fn delete_user(&self, user_id: UserId) -> AppResult<()>;
}

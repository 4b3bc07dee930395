//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use ohs_audit_application::UserRepository;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{NewUserAccount, UserAccount, UserId};

use crate::postgres_errors::{internal_error, write_error};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    is_active: bool,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            is_active: row.is_active,
        }
    }
}

mod account;
mod lookup;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: NewUserAccount) -> AppResult<UserAccount> {
        self.create_user_impl(user).await
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        self.find_user_impl(user_id).await
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserAccount>> {
        self.find_user_by_username_impl(username).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        self.list_users_impl().await
    }

    async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        self.update_password_hash_impl(user_id, password_hash).await
    }

    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        self.set_user_active_impl(user_id, is_active).await
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.delete_user_impl(user_id).await
    }
}

fn user_missing(user_id: UserId) -> AppError {
    AppError::NotFound(format!("user '{user_id}' does not exist"))
}

#[cfg(test)]
mod tests {
    use ohs_audit_application::UserRepository;
    use ohs_audit_core::{AppError, AppResult};
    use ohs_audit_domain::NewUserAccount;

    use super::PostgresUserRepository;
    use crate::postgres_test_support::test_pool;

    #[tokio::test]
    async fn taken_username_is_conflict() -> AppResult<()> {
        let Some(pool) = test_pool().await else {
            return Ok(());
        };

        let repository = PostgresUserRepository::new(pool);
        let username = format!("inspector-{}", chrono::Utc::now().timestamp_micros());
        let account = NewUserAccount {
            username: username.clone(),
            password_hash: "$argon2id$placeholder".to_owned(),
        };

        let created = repository.create_user(account.clone()).await?;
        assert!(created.is_active);
        assert!(matches!(
            repository.create_user(account).await,
            Err(AppError::Conflict(_))
        ));

        repository.set_user_active(created.id, false).await?;
        let stored = repository.find_user_by_username(&username).await?;
        assert_eq!(stored.map(|user| user.is_active), Some(false));
        Ok(())
    }
}

use async_trait::async_trait;
use ohs_audit_application::UserRepository;
use ohs_audit_domain::NewUserAccount;

use super::*;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: NewUserAccount) -> AppResult<UserAccount> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|stored| stored.username == user.username)
        {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        let user = UserAccount {
            id: UserId::new(tables.next_id()),
            username: user.username,
            password_hash: user.password_hash,
            is_active: true,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserAccount>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        let tables = self.tables.read().await;
        let mut users: Vec<UserAccount> = tables.users.values().cloned().collect();
        users.sort_by(|left, right| left.username.cmp(&right.username));
        Ok(users)
    }

    async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| missing("user", user_id))?;
        password_hash.clone_into(&mut user.password_hash);
        Ok(())
    }

    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| missing("user", user_id))?;
        user.is_active = is_active;
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| missing("user", user_id))
    }
}

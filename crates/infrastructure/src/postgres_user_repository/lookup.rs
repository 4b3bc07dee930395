use super::*;

impl PostgresUserRepository {
    pub(super) async fn find_user_impl(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find user by id"))?;

        Ok(row.map(UserAccount::from))
    }

    pub(super) async fn find_user_by_username_impl(
        &self,
        username: &str,
    ) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, is_active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find user by username"))?;

        Ok(row.map(UserAccount::from))
    }

    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserAccount>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, is_active FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list users"))?;

        Ok(rows.into_iter().map(UserAccount::from).collect())
    }
}

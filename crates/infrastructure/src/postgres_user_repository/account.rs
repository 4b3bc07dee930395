use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_user_impl(&self, user: NewUserAccount) -> AppResult<UserAccount> {
        let conflict = format!("username '{}' is already taken", user.username);
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, is_active
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "create user", &conflict))?;

        Ok(row.into())
    }

    pub(super) async fn update_password_hash_impl(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id.as_i64())
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "update password"))?;

        if result.rows_affected() == 0 {
            return Err(user_missing(user_id));
        }

        Ok(())
    }

    pub(super) async fn set_user_active_impl(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(user_id.as_i64())
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "change user activation"))?;

        if result.rows_affected() == 0 {
            return Err(user_missing(user_id));
        }

        Ok(())
    }

    pub(super) async fn delete_user_impl(&self, user_id: UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete user"))?;

        if result.rows_affected() == 0 {
            return Err(user_missing(user_id));
        }

        Ok(())
    }
}

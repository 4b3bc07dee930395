//! OHS audit API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod sample_data;
mod state;

#[cfg(test)]
mod test_support;

use std::env;
use std::sync::Arc;

use ohs_audit_core::AppError;
use ohs_audit_infrastructure::Argon2PasswordHasher;
use tracing::info;

use crate::api_config::{ApiConfig, Command, init_tracing};
use crate::api_services::{
    RepositorySet, build_app_state, build_email_service, build_postgres_session_layer,
    connect_and_migrate,
};

const USER_PASSWORD_VARIABLE: &str = "OHS_AUDIT_USER_PASSWORD";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let pool = connect_and_migrate(&config.database_url).await?;

    let app_state = build_app_state(
        RepositorySet::postgres(&pool),
        Arc::new(Argon2PasswordHasher::new()),
        build_email_service(&config)?,
        &config.public_base_url,
        config.email_timeout,
    )?;

    match &config.command {
        Command::Migrate => {
            info!("database migrations applied successfully");
            Ok(())
        }
        Command::CreateUser { username } => {
            let password = env::var(USER_PASSWORD_VARIABLE).map_err(|_| {
                AppError::Configuration(format!("{USER_PASSWORD_VARIABLE} is required"))
            })?;
            let user = app_state
                .auth_service
                .create_user(username, &password)
                .await?;
            info!(user_id = %user.id, username = %user.username, "user created");
            Ok(())
        }
        Command::SetUserActive {
            username,
            is_active,
        } => {
            app_state
                .auth_service
                .set_active(username, *is_active)
                .await?;
            Ok(())
        }
        Command::SeedSample => {
            sample_data::run(&app_state).await?;
            Ok(())
        }
        Command::Serve => {
            let session_layer = build_postgres_session_layer(
                pool,
                config.cookie_secure,
                config.session_idle_minutes,
            )
            .await?;
            let app = api_router::build_router(app_state, session_layer);

            let address = config.socket_address()?;
            let listener = tokio::net::TcpListener::bind(address)
                .await
                .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

            info!(%address, "ohs-audit-api listening");

            axum::serve(listener, app)
                .await
                .map_err(|error| AppError::Internal(format!("api server error: {error}")))
        }
    }
}

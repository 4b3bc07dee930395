mod database;
mod email;
mod sessions;
mod state_builder;

pub use database::connect_and_migrate;
pub use email::build_email_service;
pub use sessions::{build_postgres_session_layer, build_session_layer};
pub use state_builder::{RepositorySet, build_app_state};

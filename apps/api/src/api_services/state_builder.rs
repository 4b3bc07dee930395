use std::sync::Arc;
use std::time::Duration;

use ohs_audit_application::{
    AuditRepositories, AuditService, AuthService, EmailService, FollowUpService,
    OrganizationService, PasswordHasher, ShareService, UserRepository,
};
use ohs_audit_core::{AppError, AppResult};
use url::Url;

use crate::state::AppState;

mod repositories;

/// Store adapters behind every application port.
#[derive(Clone)]
pub struct RepositorySet {
    pub records: AuditRepositories,
    pub users: Arc<dyn UserRepository>,
}

pub fn build_app_state(
    repositories: RepositorySet,
    password_hasher: Arc<dyn PasswordHasher>,
    email_service: Arc<dyn EmailService>,
    public_base_url: &str,
    email_timeout: Duration,
) -> AppResult<AppState> {
    let allowed_origin = Url::parse(public_base_url)
        .map_err(|error| AppError::Configuration(format!("invalid PUBLIC_BASE_URL: {error}")))?
        .origin()
        .ascii_serialization();
    let records = repositories.records;

    Ok(AppState {
        auth_service: AuthService::new(repositories.users, password_hasher),
        organization_service: OrganizationService::new(
            records.clients.clone(),
            records.consulting_firms.clone(),
            records.principal_contractors.clone(),
            records.projects.clone(),
        ),
        follow_up_service: FollowUpService::new(
            records.audits.clone(),
            records.checklist.clone(),
            records.risk_ratings.clone(),
            records.action_items.clone(),
            records.site_personnel.clone(),
            records.observations.clone(),
        ),
        share_service: ShareService::new(
            records.audits.clone(),
            email_service,
            public_base_url,
            email_timeout,
        ),
        audit_service: AuditService::new(records),
        allowed_origin,
    })
}

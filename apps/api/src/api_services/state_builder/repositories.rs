use std::sync::Arc;

use ohs_audit_application::AuditRepositories;
use ohs_audit_infrastructure::{
    PostgresAuditRepository, PostgresChecklistRepository, PostgresFollowUpRepository,
    PostgresOrganizationRepository, PostgresUserRepository,
};
use sqlx::PgPool;

use super::RepositorySet;

impl RepositorySet {
    /// PostgreSQL adapters sharing one pool.
    pub fn postgres(pool: &PgPool) -> Self {
        let organizations = Arc::new(PostgresOrganizationRepository::new(pool.clone()));
        let follow_up = Arc::new(PostgresFollowUpRepository::new(pool.clone()));

        Self {
            records: AuditRepositories {
                audits: Arc::new(PostgresAuditRepository::new(pool.clone())),
                projects: organizations.clone(),
                clients: organizations.clone(),
                consulting_firms: organizations.clone(),
                principal_contractors: organizations,
                checklist: Arc::new(PostgresChecklistRepository::new(pool.clone())),
                risk_ratings: follow_up.clone(),
                action_items: follow_up.clone(),
                site_personnel: follow_up.clone(),
                observations: follow_up,
            },
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
        }
    }

    /// Every port served by one in-memory store.
    #[cfg(test)]
    pub fn in_memory(store: Arc<ohs_audit_infrastructure::InMemoryStore>) -> Self {
        Self {
            records: AuditRepositories {
                audits: store.clone(),
                projects: store.clone(),
                clients: store.clone(),
                consulting_firms: store.clone(),
                principal_contractors: store.clone(),
                checklist: store.clone(),
                risk_ratings: store.clone(),
                action_items: store.clone(),
                site_personnel: store.clone(),
                observations: store.clone(),
            },
            users: store,
        }
    }
}

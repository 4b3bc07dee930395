use ohs_audit_application::{AuditRepository, ClientRepository};
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::ProjectId;

use super::PostgresAuditRepository;
use crate::PostgresOrganizationRepository;
use crate::postgres_test_support::{sample_audit, seed_project, test_pool};

#[tokio::test]
async fn missing_project_is_field_error_on_project() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let repository = PostgresAuditRepository::new(pool);
    let result = repository
        .create_audit(sample_audit(ProjectId::new(i64::MAX), "PG-MISSING-PROJECT"))
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert!(errors.contains("project"));
    assert!(
        repository
            .find_audit_by_report_number("PG-MISSING-PROJECT")
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn stored_audit_round_trips_percentages() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let project = seed_project(&pool).await?;
    let repository = PostgresAuditRepository::new(pool);
    let created = repository
        .create_audit(sample_audit(project.id, "PG-ROUND-TRIP"))
        .await?;

    let stored = repository.find_audit(created.id).await?;
    assert_eq!(stored.as_ref(), Some(&created));
    assert_eq!(
        stored.map(|audit| audit.standard_required.to_string()),
        Some("75.00".to_owned())
    );
    Ok(())
}

#[tokio::test]
async fn deleting_client_removes_its_audits() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let project = seed_project(&pool).await?;
    let audits = PostgresAuditRepository::new(pool.clone());
    let audit = audits
        .create_audit(sample_audit(project.id, "PG-CASCADE"))
        .await?;

    PostgresOrganizationRepository::new(pool)
        .delete_client(project.client_id)
        .await?;

    assert!(audits.find_audit(audit.id).await?.is_none());
    Ok(())
}

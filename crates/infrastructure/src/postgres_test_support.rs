//! Shared fixtures for PostgreSQL adapter tests. Tests skip when
//! `DATABASE_URL` is not set.

use chrono::NaiveDate;
use ohs_audit_application::{
    ClientRepository, ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
};
use ohs_audit_core::AppResult;
use ohs_audit_domain::{
    AuditType, NewAudit, NewClient, NewConsultingFirm, NewPrincipalContractor, NewProject,
    Percentage, Project, ProjectId,
};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::PostgresOrganizationRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres tests: {error}");
    }

    Some(pool)
}

pub(crate) async fn seed_project(pool: &PgPool) -> AppResult<Project> {
    let repository = PostgresOrganizationRepository::new(pool.clone());
    let client = repository
        .create_client(NewClient::named("City of Tshwane"))
        .await?;
    let firm = repository
        .create_consulting_firm(NewConsultingFirm {
            name: "Ndlovu Engineers".to_owned(),
        })
        .await?;
    let contractor = repository
        .create_principal_contractor(NewPrincipalContractor {
            name: "Gabby Construction".to_owned(),
            registration_number: None,
        })
        .await?;

    repository
        .create_project(NewProject {
            title: "Road Upgrade".to_owned(),
            permit_number: "CW-2025-118".to_owned(),
            location: "Pretoria North".to_owned(),
            client_id: client.id,
            consulting_engineer_id: firm.id,
            principal_contractor_id: contractor.id,
        })
        .await
}

pub(crate) fn sample_audit(project_id: ProjectId, report_number: &str) -> NewAudit {
    NewAudit {
        project_id,
        audit_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap_or_default(),
        audit_type: AuditType::Ohs,
        audit_number: "001".to_owned(),
        performed_by: "Lethu Safety Consultants".to_owned(),
        report_number: report_number.to_owned(),
        overall_score_percentage: Percentage::STANDARD_REQUIRED,
        standard_required: Percentage::STANDARD_REQUIRED,
        improvement_notices: 0,
        contravention_notices: 1,
        prohibition_notices: 0,
    }
}

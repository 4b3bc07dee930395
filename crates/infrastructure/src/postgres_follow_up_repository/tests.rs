use ohs_audit_application::{
    ActionItemRepository, AuditRepository, RiskRatingRepository, SitePersonnelRepository,
};
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    AuditId, NewActionItem, NewRiskRating, RiskLevel, RiskRatingId, SitePersonnelCounts,
};

use super::PostgresFollowUpRepository;
use crate::PostgresAuditRepository;
use crate::postgres_test_support::{sample_audit, seed_project, test_pool};

#[tokio::test]
async fn site_personnel_upsert_keeps_one_row() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let project = seed_project(&pool).await?;
    let audit = PostgresAuditRepository::new(pool.clone())
        .create_audit(sample_audit(project.id, "PG-PERSONNEL"))
        .await?;
    let repository = PostgresFollowUpRepository::new(pool);

    let first = repository
        .save_site_personnel(
            audit.id,
            SitePersonnelCounts {
                total_personnel: 20,
                ..SitePersonnelCounts::default()
            },
        )
        .await?;
    let second = repository
        .save_site_personnel(
            audit.id,
            SitePersonnelCounts {
                total_personnel: 24,
                subcontractor_count: Some(6),
                ..SitePersonnelCounts::default()
            },
        )
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.total_personnel, 24);
    Ok(())
}

#[tokio::test]
async fn action_for_missing_audit_is_field_error() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let repository = PostgresFollowUpRepository::new(pool);
    let result = repository
        .create_action_item(NewActionItem {
            audit_id: AuditId::new(i64::MAX),
            description: "Repair guard rail".to_owned(),
            regulation_reference: None,
            assigned_to: "Site agent".to_owned(),
            risk_rating_id: Some(RiskRatingId::new(i64::MAX)),
            due_date: None,
            comments: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn ratings_list_from_most_severe() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };

    let repository = PostgresFollowUpRepository::new(pool);
    for level in [RiskLevel::Low, RiskLevel::Critical] {
        if repository.find_risk_rating_by_level(level).await?.is_none() {
            match repository
                .create_risk_rating(NewRiskRating {
                    level,
                    time_frame: "Within 14 days".to_owned(),
                })
                .await
            {
                Ok(_) | Err(AppError::Conflict(_)) => {}
                Err(error) => return Err(error),
            }
        }
    }

    let levels: Vec<RiskLevel> = repository
        .list_risk_ratings()
        .await?
        .into_iter()
        .map(|rating| rating.level)
        .collect();
    let critical = levels.iter().position(|level| *level == RiskLevel::Critical);
    let low = levels.iter().position(|level| *level == RiskLevel::Low);
    assert!(critical < low);
    Ok(())
}

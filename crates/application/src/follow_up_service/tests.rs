use std::sync::Arc;

use chrono::NaiveDate;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    Audit, AuditId, ChecklistCategory, ComplianceScore, FieldInput, NewActionItem,
    NewChecklistItem, NewRiskRating, RiskLevel, SitePersonnelCounts,
};

use crate::fakes::FakeStore;
use crate::{AuditRepositories, AuditService};

use super::FollowUpService;

fn build_service(store: &Arc<FakeStore>) -> FollowUpService {
    FollowUpService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

async fn stored_audit(store: &Arc<FakeStore>) -> AppResult<Audit> {
    let project = store.seed_project().await;
    let audits = AuditService::new(AuditRepositories {
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
    });

    audits
        .create_audit(
            &FieldInput::new()
                .with("project", project.id.to_string())
                .with("audit_date", "2025-06-14")
                .with("audit_number", "001")
                .with("performed_by", "Lethu Safety Consultants")
                .with("report_number", "CHS-LSC-2025/06")
                .with("overall_score_percentage", "71"),
        )
        .await
}

#[tokio::test]
async fn duplicate_checklist_item_is_a_conflict() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);
    let audit = stored_audit(&store).await?;

    let item = NewChecklistItem::scored(
        audit.id,
        ChecklistCategory::OhsDocumentation,
        "SHE_FILE",
        ComplianceScore::Full,
    );
    service.record_checklist_item(item.clone()).await?;

    let mut second = item;
    second.actual_score = ComplianceScore::NonCompliant;
    let result = service.record_checklist_item(second).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn checklist_item_for_missing_audit_is_not_found() {
    let store = FakeStore::shared();
    let service = build_service(&store);

    let result = service
        .record_checklist_item(NewChecklistItem::scored(
            AuditId::new(77),
            ChecklistCategory::FirePrevention,
            "AWARENESS",
            ComplianceScore::Full,
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn saving_a_risk_rating_twice_updates_time_frame() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);

    let first = service
        .save_risk_rating(NewRiskRating {
            level: RiskLevel::High,
            time_frame: "7 days".to_owned(),
        })
        .await?;
    let second = service
        .save_risk_rating(NewRiskRating {
            level: RiskLevel::High,
            time_frame: "48 hours".to_owned(),
        })
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(service.list_risk_ratings().await?.len(), 1);
    assert_eq!(second.time_frame, "48 hours");
    Ok(())
}

#[tokio::test]
async fn action_item_completes_with_date() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);
    let audit = stored_audit(&store).await?;
    let rating = service
        .save_risk_rating(NewRiskRating {
            level: RiskLevel::Critical,
            time_frame: "Immediate".to_owned(),
        })
        .await?;

    let item = service
        .add_action_item(NewActionItem {
            audit_id: audit.id,
            description: "Appoint a construction health and safety officer".to_owned(),
            regulation_reference: Some("CR 8(5)".to_owned()),
            assigned_to: "Principal Contractor".to_owned(),
            risk_rating_id: Some(rating.id),
            due_date: None,
            comments: None,
        })
        .await?;
    assert!(!item.completed);

    let done_on = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default();
    let item = service.complete_action_item(item.id, done_on).await?;
    assert!(item.completed);
    assert_eq!(item.completion_date, Some(done_on));
    Ok(())
}

#[tokio::test]
async fn site_personnel_rejects_negative_counts() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);
    let audit = stored_audit(&store).await?;

    let result = service
        .save_site_personnel(
            audit.id,
            SitePersonnelCounts {
                total_personnel: -3,
                ..SitePersonnelCounts::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let saved = service
        .save_site_personnel(
            audit.id,
            SitePersonnelCounts {
                total_personnel: 42,
                worker_count: Some(35),
                ..SitePersonnelCounts::default()
            },
        )
        .await?;
    assert_eq!(saved.total_personnel, 42);
    Ok(())
}

//! Loads the Gabby Construction sample audit.
//!
//! Every step looks for existing rows first, so running the loader twice
//! leaves one copy of the data.

use ohs_audit_application::AuditService;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    Audit, ChecklistCategory, ComplianceScore, FieldInput, NewActionItem, NewChecklistItem,
    NewClient, NewConsultingFirm, NewPrincipalContractor, NewProject, NewRiskRating, RiskLevel,
};
use tracing::info;

use crate::state::AppState;

const REPORT_NUMBER: &str = "CHS-LSC-2025/06";
const PERMIT_NUMBER: &str = "MP-CWP/328/09/2024";

const LEGAL_APPOINTMENTS: [(&str, &str, ComplianceScore, Option<&str>); 5] = [
    ("CEO_16_1", "PRECIOUS MORGAN", ComplianceScore::Full, None),
    ("CEO_16_2", "EUGENE NDLOVU", ComplianceScore::Full, None),
    ("CONSTR_MGR_8_1", "THULANI KHUMALO", ComplianceScore::Full, None),
    ("CHS_OFFICER_8_5", "CHOEU SERAME", ComplianceScore::Full, None),
    (
        "ELEC_INSP",
        "",
        ComplianceScore::NonCompliant,
        Some("NONE COMPLIANCE."),
    ),
];

const RISK_RATINGS: [(RiskLevel, &str); 4] = [
    (RiskLevel::Critical, "Immediate"),
    (RiskLevel::High, "Within 24 hours"),
    (RiskLevel::Medium, "Within 3 days"),
    (RiskLevel::Low, "Within 7 days"),
];

const ACTION_ITEMS: [(&str, &str); 3] = [
    (
        "To ensure that all management and supervision personnel are appointed in writing and \
         their competency certificates are attached to those appointments and accepted by \
         appointees",
        "CR 8(5)",
    ),
    (
        "Ensure that a breathalyser is readily available on site. Random alcohol testing and \
         records kept on site. Drug and Alcohol policy to be communicated regularly",
        "GSR.2(a)",
    ),
    (
        "Ensure Traffic Accommodation Layout Plan is displayed clearly and updated regularly as \
         project progress",
        "",
    ),
];

/// Summary of one loader run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub audit_created: bool,
    pub checklist_rows_added: usize,
    pub risk_ratings_added: usize,
    pub action_items_added: usize,
}

pub async fn run(state: &AppState) -> AppResult<SeedReport> {
    let organizations = &state.organization_service;
    let client = organizations
        .ensure_client(NewClient::named("MBOMBELA MUNICIPALITY"))
        .await?;
    let consulting_engineer = organizations
        .ensure_consulting_firm(NewConsultingFirm {
            name: "MK DUBE CONSULTING".to_owned(),
        })
        .await?;
    let principal_contractor = organizations
        .ensure_principal_contractor(NewPrincipalContractor {
            name: "GABBY CONSTRUCTION".to_owned(),
            registration_number: Some("CONSTR12345".to_owned()),
        })
        .await?;
    let project = organizations
        .ensure_project(NewProject {
            title: "PAVING OF GOROMANE TO KAMABUZA (VIA TFOLINHLANHLA) AT SHABALALA WARD 1"
                .to_owned(),
            permit_number: PERMIT_NUMBER.to_owned(),
            location: "Shabalala Ward 1".to_owned(),
            client_id: client.id,
            consulting_engineer_id: consulting_engineer.id,
            principal_contractor_id: principal_contractor.id,
        })
        .await?;

    let mut report = SeedReport::default();
    let audit = match state
        .audit_service
        .find_by_report_number(REPORT_NUMBER)
        .await?
    {
        Some(audit) => audit,
        None => {
            report.audit_created = true;
            create_audit(&state.audit_service, &project.id.to_string()).await?
        }
    };

    for (code, person, score, comments) in LEGAL_APPOINTMENTS {
        let mut item =
            NewChecklistItem::scored(audit.id, ChecklistCategory::LegalAppointment, code, score);
        item.appointed_person = Some(person.to_owned()).filter(|name| !name.is_empty());
        item.comments = comments.map(ToOwned::to_owned);

        match state.follow_up_service.record_checklist_item(item).await {
            Ok(_) => report.checklist_rows_added += 1,
            Err(AppError::Conflict(_)) => {}
            Err(error) => return Err(error),
        }
    }

    let existing_levels: Vec<RiskLevel> = state
        .follow_up_service
        .list_risk_ratings()
        .await?
        .into_iter()
        .map(|rating| rating.level)
        .collect();
    for (level, time_frame) in RISK_RATINGS {
        if existing_levels.contains(&level) {
            continue;
        }
        state
            .follow_up_service
            .save_risk_rating(NewRiskRating {
                level,
                time_frame: time_frame.to_owned(),
            })
            .await?;
        report.risk_ratings_added += 1;
    }

    let existing_actions: Vec<String> = state
        .audit_service
        .audit_detail(audit.id)
        .await?
        .action_items
        .into_iter()
        .map(|detail| detail.item.description)
        .collect();
    for (description, regulation_reference) in ACTION_ITEMS {
        if existing_actions.iter().any(|existing| existing == description) {
            continue;
        }
        state
            .follow_up_service
            .add_action_item(NewActionItem {
                audit_id: audit.id,
                description: description.to_owned(),
                regulation_reference: Some(regulation_reference.to_owned())
                    .filter(|reference| !reference.is_empty()),
                assigned_to: "Principal Contractor".to_owned(),
                risk_rating_id: None,
                due_date: None,
                comments: None,
            })
            .await?;
        report.action_items_added += 1;
    }

    info!(
        audit_id = %audit.id,
        audit_created = report.audit_created,
        checklist_rows_added = report.checklist_rows_added,
        risk_ratings_added = report.risk_ratings_added,
        action_items_added = report.action_items_added,
        "sample audit data loaded"
    );
    Ok(report)
}

async fn create_audit(audit_service: &AuditService, project_id: &str) -> AppResult<Audit> {
    let input = FieldInput::new()
        .with("project", project_id)
        .with("audit_date", "2025-07-17")
        .with("audit_type", "OHS")
        .with("audit_number", "001")
        .with("performed_by", "LETHU SAFETY CONSULTANTS (PTY) LTD")
        .with("report_number", REPORT_NUMBER)
        .with("overall_score_percentage", "84.00")
        .with("standard_required", "75.00")
        .with("improvement_notices", "1")
        .with("contravention_notices", "0")
        .with("prohibition_notices", "0");

    audit_service.create_audit(&input).await
}

#[cfg(test)]
mod tests {
    use ohs_audit_core::AppResult;

    use super::{REPORT_NUMBER, run};
    use crate::test_support::test_context;

    #[tokio::test]
    async fn second_run_adds_nothing() -> AppResult<()> {
        let context = test_context();

        let first = run(&context.state).await?;
        assert!(first.audit_created);
        assert_eq!(first.checklist_rows_added, 5);
        assert_eq!(first.risk_ratings_added, 4);
        assert_eq!(first.action_items_added, 3);

        let second = run(&context.state).await?;
        assert_eq!(second, super::SeedReport::default());

        let audit = context
            .state
            .audit_service
            .find_by_report_number(REPORT_NUMBER)
            .await?;
        let Some(audit) = audit else {
            unreachable!("sample audit should exist");
        };
        let detail = context.state.audit_service.audit_detail(audit.id).await?;
        assert_eq!(detail.checklist[0].items.len(), 5);
        assert_eq!(detail.checklist[0].actual_total, 8);
        assert_eq!(detail.checklist[0].required_total, 10);
        assert_eq!(detail.action_items.len(), 3);
        Ok(())
    }
}

use chrono::NaiveDate;
use ohs_audit_application::{ActionItemDetail, AuditDetail};
use ohs_audit_domain::{
    ActionItem, Audit, AuditSummary, ChecklistCategory, ChecklistItem, ChecklistSection,
    ConsultingFirm, Page, PrincipalContractor, Project, RiskRating, SitePersonnel,
    VisualObservation,
};
use serde::Serialize;

use super::ClientResponse;

/// Pagination state of the dashboard.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub page_size: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One dashboard page, newest audits first.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub audits: Vec<AuditSummary>,
    pub page: PageResponse,
}

impl From<Page<AuditSummary>> for DashboardResponse {
    fn from(page: Page<AuditSummary>) -> Self {
        let window = page.window;
        Self {
            audits: page.items,
            page: PageResponse {
                number: window.number,
                num_pages: window.num_pages,
                count: window.count,
                page_size: window.page_size,
                has_previous: window.has_previous(),
                has_next: window.has_next(),
            },
        }
    }
}

/// Key of a newly stored audit.
#[derive(Debug, Serialize)]
pub struct CreateAuditResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    #[serde(flatten)]
    pub audit: Audit,
    pub audit_type_label: &'static str,
    pub meets_standard: bool,
}

#[derive(Debug, Serialize)]
pub struct ChecklistItemResponse {
    #[serde(flatten)]
    pub item: ChecklistItem,
    pub label: &'static str,
    pub actual_score_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ChecklistSectionResponse {
    pub category: ChecklistCategory,
    pub label: &'static str,
    pub items: Vec<ChecklistItemResponse>,
    pub actual_total: i32,
    pub required_total: i32,
}

impl From<ChecklistSection> for ChecklistSectionResponse {
    fn from(section: ChecklistSection) -> Self {
        Self {
            category: section.category,
            label: section.category.label(),
            items: section
                .items
                .into_iter()
                .map(|item| ChecklistItemResponse {
                    label: item.item_label(),
                    actual_score_label: item.actual_score.label(),
                    item,
                })
                .collect(),
            actual_total: section.actual_total,
            required_total: section.required_total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RiskRatingResponse {
    #[serde(flatten)]
    pub rating: RiskRating,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ActionItemResponse {
    #[serde(flatten)]
    pub item: ActionItem,
    pub risk_rating: Option<RiskRatingResponse>,
    pub overdue: bool,
}

impl ActionItemResponse {
    fn from_detail(detail: ActionItemDetail, today: NaiveDate) -> Self {
        Self {
            overdue: detail.item.is_overdue(today),
            risk_rating: detail.risk_rating.map(|rating| RiskRatingResponse {
                label: rating.level.label(),
                rating,
            }),
            item: detail.item,
        }
    }
}

/// Full audit report.
#[derive(Debug, Serialize)]
pub struct AuditDetailResponse {
    pub audit: AuditResponse,
    pub project: Project,
    pub client: ClientResponse,
    pub consulting_engineer: ConsultingFirm,
    pub principal_contractor: PrincipalContractor,
    pub checklist: Vec<ChecklistSectionResponse>,
    pub action_items: Vec<ActionItemResponse>,
    pub site_personnel: Option<SitePersonnel>,
    pub visual_observations: Vec<VisualObservation>,
}

impl AuditDetailResponse {
    /// Flags actions past their due date relative to `today`.
    #[must_use]
    pub fn from_detail(detail: AuditDetail, today: NaiveDate) -> Self {
        Self {
            audit: AuditResponse {
                audit_type_label: detail.audit.audit_type.label(),
                meets_standard: detail.audit.meets_standard(),
                audit: detail.audit,
            },
            project: detail.project,
            client: detail.client.into(),
            consulting_engineer: detail.consulting_engineer,
            principal_contractor: detail.principal_contractor,
            checklist: detail
                .checklist
                .into_iter()
                .map(ChecklistSectionResponse::from)
                .collect(),
            action_items: detail
                .action_items
                .into_iter()
                .map(|item| ActionItemResponse::from_detail(item, today))
                .collect(),
            site_personnel: detail.site_personnel,
            visual_observations: detail.visual_observations,
        }
    }
}

//! Audit dashboard, creation, and detail read model.

use std::sync::Arc;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    ActionItem, Audit, AuditId, ChecklistSection, Client, ConsultingFirm, PrincipalContractor,
    Project, RiskRating, SitePersonnel, VisualObservation,
};
use serde::Serialize;

use crate::{
    ActionItemRepository, AuditRepository, ChecklistRepository, ClientRepository,
    ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
    RiskRatingRepository, SitePersonnelRepository, VisualObservationRepository,
};

mod creation;
mod dashboard;
mod detail;

/// Repositories the audit service reads from.
#[derive(Clone)]
pub struct AuditRepositories {
    /// Audit rows.
    pub audits: Arc<dyn AuditRepository>,
    /// Project rows.
    pub projects: Arc<dyn ProjectRepository>,
    /// Client rows.
    pub clients: Arc<dyn ClientRepository>,
    /// Consulting firm rows.
    pub consulting_firms: Arc<dyn ConsultingFirmRepository>,
    /// Principal contractor rows.
    pub principal_contractors: Arc<dyn PrincipalContractorRepository>,
    /// Checklist rows.
    pub checklist: Arc<dyn ChecklistRepository>,
    /// Risk ratings.
    pub risk_ratings: Arc<dyn RiskRatingRepository>,
    /// Action items.
    pub action_items: Arc<dyn ActionItemRepository>,
    /// Site head counts.
    pub site_personnel: Arc<dyn SitePersonnelRepository>,
    /// Visual observations.
    pub observations: Arc<dyn VisualObservationRepository>,
}

/// One selectable value of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChoice {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Rendering hints for one audit form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormFieldMetadata {
    /// Field name as submitted.
    pub name: &'static str,
    /// Input type: `text`, `date`, or `number`.
    #[serde(rename = "type")]
    pub field_type: &'static str,
    /// Allowed values, for choice fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<FieldChoice>>,
}

/// Field metadata for the audit creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFormMetadata {
    /// Identification fields.
    pub fields: Vec<FormFieldMetadata>,
    /// Score fields.
    pub score_fields: Vec<FormFieldMetadata>,
    /// Notice counter fields.
    pub notice_fields: Vec<FormFieldMetadata>,
}

/// Action item with its risk rating resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemDetail {
    /// Stored action.
    pub item: ActionItem,
    /// Rating, when one is set.
    pub risk_rating: Option<RiskRating>,
}

/// Everything shown on an audit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDetail {
    /// The audit itself.
    pub audit: Audit,
    /// Audited project.
    pub project: Project,
    /// Project client.
    pub client: Client,
    /// Consulting engineer on the project.
    pub consulting_engineer: ConsultingFirm,
    /// Principal contractor on the project.
    pub principal_contractor: PrincipalContractor,
    /// Checklist rows grouped per section, in report order.
    pub checklist: Vec<ChecklistSection>,
    /// Corrective actions.
    pub action_items: Vec<ActionItemDetail>,
    /// Head count, when recorded.
    pub site_personnel: Option<SitePersonnel>,
    /// Observations, oldest first.
    pub visual_observations: Vec<VisualObservation>,
}

/// Application service for audits.
#[derive(Clone)]
pub struct AuditService {
    repositories: AuditRepositories,
}

impl AuditService {
    /// Creates a new audit service.
    #[must_use]
    pub fn new(repositories: AuditRepositories) -> Self {
        Self { repositories }
    }

    /// Returns one audit or `NotFound`.
    pub async fn audit(&self, audit_id: AuditId) -> AppResult<Audit> {
        self.repositories
            .audits
            .find_audit(audit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("audit '{audit_id}' does not exist")))
    }
}

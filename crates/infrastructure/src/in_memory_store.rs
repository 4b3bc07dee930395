//! In-memory Entity Store.
//!
//! All tables sit behind one `RwLock`. Every write holds the write guard for
//! its whole check-then-write sequence, so reference checks, uniqueness
//! checks, and cascades are atomic with respect to each other.

use std::collections::BTreeMap;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    ActionItem, ActionItemId, Audit, AuditId, ChecklistItem, ChecklistItemId, Client, ClientId,
    ConsultingFirm, ConsultingFirmId, PrincipalContractor, PrincipalContractorId, Project,
    ProjectId, RiskRating, RiskRatingId, SitePersonnel, SitePersonnelId, UserAccount, UserId,
    VisualObservation, VisualObservationId, input::INVALID_REFERENCE,
};
use tokio::sync::RwLock;

mod account;
mod audit;
mod checklist;
mod follow_up;
mod organization;

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    clients: BTreeMap<ClientId, Client>,
    consulting_firms: BTreeMap<ConsultingFirmId, ConsultingFirm>,
    principal_contractors: BTreeMap<PrincipalContractorId, PrincipalContractor>,
    projects: BTreeMap<ProjectId, Project>,
    audits: BTreeMap<AuditId, Audit>,
    checklist_items: BTreeMap<ChecklistItemId, ChecklistItem>,
    risk_ratings: BTreeMap<RiskRatingId, RiskRating>,
    action_items: BTreeMap<ActionItemId, ActionItem>,
    site_personnel: BTreeMap<SitePersonnelId, SitePersonnel>,
    visual_observations: BTreeMap<VisualObservationId, VisualObservation>,
    users: BTreeMap<UserId, UserAccount>,
}

impl Tables {
    /// Keys are shared across tables and never reused.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn delete_projects_where(&mut self, matches: impl Fn(&Project) -> bool) {
        let doomed: Vec<ProjectId> = self
            .projects
            .values()
            .filter(|project| matches(project))
            .map(|project| project.id)
            .collect();

        for project_id in doomed {
            self.delete_project_cascade(project_id);
        }
    }

    fn delete_project_cascade(&mut self, project_id: ProjectId) {
        self.projects.remove(&project_id);
        let doomed: Vec<AuditId> = self
            .audits
            .values()
            .filter(|audit| audit.project_id == project_id)
            .map(|audit| audit.id)
            .collect();

        for audit_id in doomed {
            self.delete_audit_cascade(audit_id);
        }
    }

    fn delete_audit_cascade(&mut self, audit_id: AuditId) {
        self.audits.remove(&audit_id);
        self.checklist_items
            .retain(|_, item| item.audit_id != audit_id);
        self.action_items.retain(|_, item| item.audit_id != audit_id);
        self.site_personnel
            .retain(|_, personnel| personnel.audit_id != audit_id);
        self.visual_observations
            .retain(|_, observation| observation.audit_id != audit_id);
    }

    fn require_audit_reference(&self, audit_id: AuditId) -> AppResult<()> {
        if self.audits.contains_key(&audit_id) {
            Ok(())
        } else {
            Err(AppError::field("audit", INVALID_REFERENCE))
        }
    }
}

/// Entity Store keeping every table in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(kind: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{kind} '{id}' does not exist"))
}

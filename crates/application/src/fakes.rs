//! Test doubles for the application ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    ActionItem, ActionItemId, Audit, AuditId, AuditSummary, ChecklistItem, ChecklistItemId, Client,
    ClientId, ConsultingFirm, ConsultingFirmId, NewActionItem, NewAudit, NewChecklistItem,
    NewClient, NewConsultingFirm, NewPrincipalContractor, NewProject, NewRiskRating,
    NewUserAccount, NewVisualObservation, PrincipalContractor, PrincipalContractorId, Project,
    ProjectId, RiskLevel, RiskRating, RiskRatingId, SitePersonnel, SitePersonnelCounts,
    SitePersonnelId, UserAccount, UserId, VisualObservation, VisualObservationId,
    input::INVALID_REFERENCE,
};

use crate::{
    ActionItemRepository, AuditRepository, ChecklistRepository, ClientRepository,
    ConsultingFirmRepository, EmailMessage, EmailService, PasswordHasher,
    PrincipalContractorRepository, ProjectRepository, RiskRatingRepository,
    SitePersonnelRepository, UserRepository, VisualObservationRepository,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    clients: Vec<Client>,
    firms: Vec<ConsultingFirm>,
    contractors: Vec<PrincipalContractor>,
    projects: Vec<Project>,
    audits: Vec<Audit>,
    checklist: Vec<ChecklistItem>,
    ratings: Vec<RiskRating>,
    actions: Vec<ActionItem>,
    personnel: Vec<SitePersonnel>,
    observations: Vec<VisualObservation>,
    users: Vec<UserAccount>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Naive single-lock store backing every repository port.
#[derive(Default)]
pub(crate) struct FakeStore {
    tables: Mutex<Tables>,
}

impl FakeStore {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) async fn seed_project(&self) -> Project {
        let mut tables = self.tables.lock().await;
        let client_id = ClientId::new(tables.next_id());
        tables
            .clients
            .push(NewClient::named("City of Tshwane").into_client(client_id));
        let firm_id = ConsultingFirmId::new(tables.next_id());
        tables.firms.push(ConsultingFirm {
            id: firm_id,
            name: "Ndlovu Engineers".to_owned(),
        });
        let contractor_id = PrincipalContractorId::new(tables.next_id());
        tables.contractors.push(PrincipalContractor {
            id: contractor_id,
            name: "Gabby Construction".to_owned(),
            registration_number: None,
        });
        let project = NewProject {
            title: "Road Upgrade".to_owned(),
            permit_number: "CW-2025-118".to_owned(),
            location: "Pretoria North".to_owned(),
            client_id,
            consulting_engineer_id: firm_id,
            principal_contractor_id: contractor_id,
        }
        .into_project(ProjectId::new(tables.next_id()));
        tables.projects.push(project.clone());
        project
    }

    pub(crate) async fn audit_count(&self) -> usize {
        self.tables.lock().await.audits.len()
    }
}

#[async_trait]
impl ClientRepository for FakeStore {
    async fn create_client(&self, client: NewClient) -> AppResult<Client> {
        let mut tables = self.tables.lock().await;
        let client = client.into_client(ClientId::new(tables.next_id()));
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        let tables = self.tables.lock().await;
        Ok(tables.clients.iter().find(|c| c.id == client_id).cloned())
    }

    async fn find_client_by_name(&self, name: &str) -> AppResult<Option<Client>> {
        let tables = self.tables.lock().await;
        Ok(tables.clients.iter().find(|c| c.name == name).cloned())
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let mut clients = self.tables.lock().await.clients.clone();
        clients.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(clients)
    }

    async fn update_client(&self, client: Client) -> AppResult<Client> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .clients
            .iter_mut()
            .find(|c| c.id == client.id)
            .ok_or_else(|| AppError::NotFound("client".to_owned()))?;
        *stored = client.clone();
        Ok(client)
    }

    async fn delete_client(&self, client_id: ClientId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .clients
            .retain(|c| c.id != client_id);
        Ok(())
    }
}

#[async_trait]
impl ConsultingFirmRepository for FakeStore {
    async fn create_consulting_firm(&self, firm: NewConsultingFirm) -> AppResult<ConsultingFirm> {
        let mut tables = self.tables.lock().await;
        let firm = ConsultingFirm {
            id: ConsultingFirmId::new(tables.next_id()),
            name: firm.name,
        };
        tables.firms.push(firm.clone());
        Ok(firm)
    }

    async fn find_consulting_firm(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<Option<ConsultingFirm>> {
        let tables = self.tables.lock().await;
        Ok(tables.firms.iter().find(|f| f.id == firm_id).cloned())
    }

    async fn find_consulting_firm_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<ConsultingFirm>> {
        let tables = self.tables.lock().await;
        Ok(tables.firms.iter().find(|f| f.name == name).cloned())
    }

    async fn list_consulting_firms(&self) -> AppResult<Vec<ConsultingFirm>> {
        Ok(self.tables.lock().await.firms.clone())
    }

    async fn delete_consulting_firm(&self, firm_id: ConsultingFirmId) -> AppResult<()> {
        self.tables.lock().await.firms.retain(|f| f.id != firm_id);
        Ok(())
    }
}

#[async_trait]
impl PrincipalContractorRepository for FakeStore {
    async fn create_principal_contractor(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor> {
        let mut tables = self.tables.lock().await;
        let contractor = PrincipalContractor {
            id: PrincipalContractorId::new(tables.next_id()),
            name: contractor.name,
            registration_number: contractor.registration_number,
        };
        tables.contractors.push(contractor.clone());
        Ok(contractor)
    }

    async fn find_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<Option<PrincipalContractor>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .contractors
            .iter()
            .find(|c| c.id == contractor_id)
            .cloned())
    }

    async fn find_principal_contractor_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<PrincipalContractor>> {
        let tables = self.tables.lock().await;
        Ok(tables.contractors.iter().find(|c| c.name == name).cloned())
    }

    async fn list_principal_contractors(&self) -> AppResult<Vec<PrincipalContractor>> {
        Ok(self.tables.lock().await.contractors.clone())
    }

    async fn delete_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .contractors
            .retain(|c| c.id != contractor_id);
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for FakeStore {
    async fn create_project(&self, project: NewProject) -> AppResult<Project> {
        let mut tables = self.tables.lock().await;
        if !tables.clients.iter().any(|c| c.id == project.client_id) {
            return Err(AppError::field("client", INVALID_REFERENCE));
        }
        let project = project.into_project(ProjectId::new(tables.next_id()));
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        let tables = self.tables.lock().await;
        Ok(tables.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn find_project_by_permit_number(
        &self,
        permit_number: &str,
    ) -> AppResult<Option<Project>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .projects
            .iter()
            .find(|p| p.permit_number == permit_number)
            .cloned())
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.tables.lock().await.projects.clone())
    }

    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .projects
            .retain(|p| p.id != project_id);
        Ok(())
    }
}

#[async_trait]
impl AuditRepository for FakeStore {
    async fn create_audit(&self, audit: NewAudit) -> AppResult<Audit> {
        let mut tables = self.tables.lock().await;
        if !tables.projects.iter().any(|p| p.id == audit.project_id) {
            return Err(AppError::field("project", INVALID_REFERENCE));
        }
        let audit = audit.into_audit(AuditId::new(tables.next_id()));
        tables.audits.push(audit.clone());
        Ok(audit)
    }

    async fn find_audit(&self, audit_id: AuditId) -> AppResult<Option<Audit>> {
        let tables = self.tables.lock().await;
        Ok(tables.audits.iter().find(|a| a.id == audit_id).cloned())
    }

    async fn find_audit_by_report_number(
        &self,
        report_number: &str,
    ) -> AppResult<Option<Audit>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .audits
            .iter()
            .rev()
            .find(|a| a.report_number == report_number)
            .cloned())
    }

    async fn count_audits(&self) -> AppResult<u64> {
        Ok(self.tables.lock().await.audits.len() as u64)
    }

    async fn list_audit_summaries(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<AuditSummary>> {
        let tables = self.tables.lock().await;
        let mut audits = tables.audits.clone();
        audits.sort_by(|left, right| {
            right
                .audit_date
                .cmp(&left.audit_date)
                .then(right.id.cmp(&left.id))
        });

        Ok(audits
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|audit| AuditSummary {
                id: audit.id,
                audit_date: audit.audit_date,
                audit_type: audit.audit_type,
                audit_number: audit.audit_number,
                report_number: audit.report_number,
                performed_by: audit.performed_by,
                overall_score_percentage: audit.overall_score_percentage,
                project_id: audit.project_id,
                project_title: String::new(),
                client_name: String::new(),
            })
            .collect())
    }

    async fn update_audit(&self, audit: Audit) -> AppResult<Audit> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .audits
            .iter_mut()
            .find(|a| a.id == audit.id)
            .ok_or_else(|| AppError::NotFound("audit".to_owned()))?;
        *stored = audit.clone();
        Ok(audit)
    }

    async fn delete_audit(&self, audit_id: AuditId) -> AppResult<()> {
        self.tables.lock().await.audits.retain(|a| a.id != audit_id);
        Ok(())
    }
}

#[async_trait]
impl ChecklistRepository for FakeStore {
    async fn add_checklist_item(&self, item: NewChecklistItem) -> AppResult<ChecklistItem> {
        let mut tables = self.tables.lock().await;
        if tables.checklist.iter().any(|existing| {
            existing.audit_id == item.audit_id
                && existing.category == item.category
                && existing.item_type == item.item_type
        }) {
            return Err(AppError::Conflict("duplicate checklist item".to_owned()));
        }
        let item = item.into_item(ChecklistItemId::new(tables.next_id()));
        tables.checklist.push(item.clone());
        Ok(item)
    }

    async fn find_checklist_item(
        &self,
        item_id: ChecklistItemId,
    ) -> AppResult<Option<ChecklistItem>> {
        let tables = self.tables.lock().await;
        Ok(tables.checklist.iter().find(|i| i.id == item_id).cloned())
    }

    async fn list_checklist_items(&self, audit_id: AuditId) -> AppResult<Vec<ChecklistItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .checklist
            .iter()
            .filter(|i| i.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn update_checklist_item(&self, item: ChecklistItem) -> AppResult<ChecklistItem> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .checklist
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or_else(|| AppError::NotFound("checklist item".to_owned()))?;
        *stored = item.clone();
        Ok(item)
    }

    async fn delete_checklist_item(&self, item_id: ChecklistItemId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .checklist
            .retain(|i| i.id != item_id);
        Ok(())
    }
}

#[async_trait]
impl RiskRatingRepository for FakeStore {
    async fn create_risk_rating(&self, rating: NewRiskRating) -> AppResult<RiskRating> {
        let mut tables = self.tables.lock().await;
        if tables.ratings.iter().any(|r| r.level == rating.level) {
            return Err(AppError::Conflict("duplicate risk level".to_owned()));
        }
        let rating = RiskRating {
            id: RiskRatingId::new(tables.next_id()),
            level: rating.level,
            time_frame: rating.time_frame,
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn find_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<Option<RiskRating>> {
        let tables = self.tables.lock().await;
        Ok(tables.ratings.iter().find(|r| r.id == rating_id).cloned())
    }

    async fn find_risk_rating_by_level(&self, level: RiskLevel) -> AppResult<Option<RiskRating>> {
        let tables = self.tables.lock().await;
        Ok(tables.ratings.iter().find(|r| r.level == level).cloned())
    }

    async fn list_risk_ratings(&self) -> AppResult<Vec<RiskRating>> {
        Ok(self.tables.lock().await.ratings.clone())
    }

    async fn update_risk_rating(&self, rating: RiskRating) -> AppResult<RiskRating> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .ratings
            .iter_mut()
            .find(|r| r.id == rating.id)
            .ok_or_else(|| AppError::NotFound("risk rating".to_owned()))?;
        *stored = rating.clone();
        Ok(rating)
    }

    async fn delete_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .ratings
            .retain(|r| r.id != rating_id);
        Ok(())
    }
}

#[async_trait]
impl ActionItemRepository for FakeStore {
    async fn create_action_item(&self, item: NewActionItem) -> AppResult<ActionItem> {
        let mut tables = self.tables.lock().await;
        let item = item.into_action_item(ActionItemId::new(tables.next_id()));
        tables.actions.push(item.clone());
        Ok(item)
    }

    async fn find_action_item(&self, item_id: ActionItemId) -> AppResult<Option<ActionItem>> {
        let tables = self.tables.lock().await;
        Ok(tables.actions.iter().find(|a| a.id == item_id).cloned())
    }

    async fn list_action_items(&self, audit_id: AuditId) -> AppResult<Vec<ActionItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .actions
            .iter()
            .filter(|a| a.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn update_action_item(&self, item: ActionItem) -> AppResult<ActionItem> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .actions
            .iter_mut()
            .find(|a| a.id == item.id)
            .ok_or_else(|| AppError::NotFound("action item".to_owned()))?;
        *stored = item.clone();
        Ok(item)
    }

    async fn delete_action_item(&self, item_id: ActionItemId) -> AppResult<()> {
        self.tables.lock().await.actions.retain(|a| a.id != item_id);
        Ok(())
    }
}

#[async_trait]
impl SitePersonnelRepository for FakeStore {
    async fn save_site_personnel(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel> {
        let mut tables = self.tables.lock().await;
        tables.personnel.retain(|p| p.audit_id != audit_id);
        let personnel = counts.into_personnel(SitePersonnelId::new(tables.next_id()), audit_id);
        tables.personnel.push(personnel.clone());
        Ok(personnel)
    }

    async fn find_site_personnel(&self, audit_id: AuditId) -> AppResult<Option<SitePersonnel>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .personnel
            .iter()
            .find(|p| p.audit_id == audit_id)
            .cloned())
    }

    async fn delete_site_personnel(&self, audit_id: AuditId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .personnel
            .retain(|p| p.audit_id != audit_id);
        Ok(())
    }
}

#[async_trait]
impl VisualObservationRepository for FakeStore {
    async fn record_observation(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation> {
        let mut tables = self.tables.lock().await;
        let observation = observation
            .into_observation(VisualObservationId::new(tables.next_id()), Utc::now());
        tables.observations.push(observation.clone());
        Ok(observation)
    }

    async fn list_observations(&self, audit_id: AuditId) -> AppResult<Vec<VisualObservation>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .observations
            .iter()
            .filter(|o| o.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn update_observation(
        &self,
        observation: VisualObservation,
    ) -> AppResult<VisualObservation> {
        Ok(observation)
    }

    async fn delete_observation(&self, observation_id: VisualObservationId) -> AppResult<()> {
        self.tables
            .lock()
            .await
            .observations
            .retain(|o| o.id != observation_id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn create_user(&self, user: NewUserAccount) -> AppResult<UserAccount> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("username taken".to_owned()));
        }
        let user = UserAccount {
            id: UserId::new(tables.next_id()),
            username: user.username,
            password_hash: user.password_hash,
            is_active: true,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserAccount>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<UserAccount>> {
        Ok(self.tables.lock().await.users.clone())
    }

    async fn update_password_hash(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn set_user_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.is_active = is_active;
        }
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.tables.lock().await.users.retain(|u| u.id != user_id);
        Ok(())
    }
}

/// Hasher that prefixes the password; enough to tell right from wrong.
#[derive(Default)]
pub(crate) struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

/// Email service that records messages or fails with a fixed error.
#[derive(Default)]
pub(crate) struct RecordingEmailService {
    pub(crate) sent: Mutex<Vec<EmailMessage>>,
    pub(crate) failure: Option<String>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        if let Some(failure) = &self.failure {
            return Err(AppError::Delivery(failure.clone()));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

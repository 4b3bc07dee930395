//! Clients, consulting firms, principal contractors, and projects.

use std::sync::Arc;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    Client, ClientContactUpdate, ClientId, ConsultingFirm, NewClient, NewConsultingFirm,
    NewPrincipalContractor, NewProject, PrincipalContractor, Project,
};
use tracing::info;

use crate::{
    ClientRepository, ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
};

/// Application service for the organizations audits refer to.
#[derive(Clone)]
pub struct OrganizationService {
    clients: Arc<dyn ClientRepository>,
    consulting_firms: Arc<dyn ConsultingFirmRepository>,
    principal_contractors: Arc<dyn PrincipalContractorRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl OrganizationService {
    /// Creates a new organization service.
    #[must_use]
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        consulting_firms: Arc<dyn ConsultingFirmRepository>,
        principal_contractors: Arc<dyn PrincipalContractorRepository>,
        projects: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            clients,
            consulting_firms,
            principal_contractors,
            projects,
        }
    }

    /// Lists every client ordered by name.
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.clients.list_clients().await
    }

    /// Returns one client or `NotFound`.
    pub async fn client(&self, client_id: ClientId) -> AppResult<Client> {
        self.clients
            .find_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("client '{client_id}' does not exist")))
    }

    /// Applies a contact update to a client.
    ///
    /// Fields missing from the update keep their stored value. Nothing is
    /// written when the update fails validation.
    pub async fn update_client_contact(
        &self,
        client_id: ClientId,
        update: ClientContactUpdate,
    ) -> AppResult<Client> {
        let client = self.client(client_id).await?;
        if update.is_empty() {
            return Ok(client);
        }

        let updated = update.apply_to(client);
        updated.validate()?;
        let saved = self.clients.update_client(updated).await?;

        info!(client_id = %client_id, "client contact details updated");
        Ok(saved)
    }

    /// Creates a client.
    pub async fn create_client(&self, client: NewClient) -> AppResult<Client> {
        client.validate()?;
        self.clients.create_client(client).await
    }

    /// Returns the client with the same name, creating it when missing.
    pub async fn ensure_client(&self, client: NewClient) -> AppResult<Client> {
        if let Some(existing) = self.clients.find_client_by_name(client.name.trim()).await? {
            return Ok(existing);
        }

        self.create_client(client).await
    }

    /// Returns the consulting firm with the same name, creating it when missing.
    pub async fn ensure_consulting_firm(
        &self,
        firm: NewConsultingFirm,
    ) -> AppResult<ConsultingFirm> {
        firm.validate()?;
        if let Some(existing) = self
            .consulting_firms
            .find_consulting_firm_by_name(firm.name.trim())
            .await?
        {
            return Ok(existing);
        }

        self.consulting_firms.create_consulting_firm(firm).await
    }

    /// Returns the contractor with the same name, creating it when missing.
    pub async fn ensure_principal_contractor(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor> {
        contractor.validate()?;
        if let Some(existing) = self
            .principal_contractors
            .find_principal_contractor_by_name(contractor.name.trim())
            .await?
        {
            return Ok(existing);
        }

        self.principal_contractors
            .create_principal_contractor(contractor)
            .await
    }

    /// Creates a project after checking its text fields.
    pub async fn create_project(&self, project: NewProject) -> AppResult<Project> {
        project.validate()?;
        self.projects.create_project(project).await
    }

    /// Returns the project with the same permit number, creating it when missing.
    pub async fn ensure_project(&self, project: NewProject) -> AppResult<Project> {
        if let Some(existing) = self
            .projects
            .find_project_by_permit_number(project.permit_number.trim())
            .await?
        {
            return Ok(existing);
        }

        self.create_project(project).await
    }

    /// Lists every project ordered by title.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.projects.list_projects().await
    }
}

#[cfg(test)]
mod tests;

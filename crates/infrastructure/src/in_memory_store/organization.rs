use async_trait::async_trait;
use ohs_audit_application::{
    ClientRepository, ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
};
use ohs_audit_domain::{NewClient, NewConsultingFirm, NewPrincipalContractor, NewProject};

use super::*;

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn create_client(&self, client: NewClient) -> AppResult<Client> {
        let mut tables = self.tables.write().await;
        let client = client.into_client(ClientId::new(tables.next_id()));
        tables.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        Ok(self.tables.read().await.clients.get(&client_id).cloned())
    }

    async fn find_client_by_name(&self, name: &str) -> AppResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .values()
            .find(|client| client.name == name)
            .cloned())
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let tables = self.tables.read().await;
        let mut clients: Vec<Client> = tables.clients.values().cloned().collect();
        clients.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(clients)
    }

    async fn update_client(&self, client: Client) -> AppResult<Client> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .clients
            .get_mut(&client.id)
            .ok_or_else(|| missing("client", client.id))?;
        *stored = client.clone();
        Ok(client)
    }

    async fn delete_client(&self, client_id: ClientId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.clients.remove(&client_id).is_none() {
            return Err(missing("client", client_id));
        }
        tables.delete_projects_where(|project| project.client_id == client_id);
        Ok(())
    }
}

#[async_trait]
impl ConsultingFirmRepository for InMemoryStore {
    async fn create_consulting_firm(&self, firm: NewConsultingFirm) -> AppResult<ConsultingFirm> {
        let mut tables = self.tables.write().await;
        let firm = ConsultingFirm {
            id: ConsultingFirmId::new(tables.next_id()),
            name: firm.name.trim().to_owned(),
        };
        tables.consulting_firms.insert(firm.id, firm.clone());
        Ok(firm)
    }

    async fn find_consulting_firm(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<Option<ConsultingFirm>> {
        Ok(self
            .tables
            .read()
            .await
            .consulting_firms
            .get(&firm_id)
            .cloned())
    }

    async fn find_consulting_firm_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<ConsultingFirm>> {
        let tables = self.tables.read().await;
        Ok(tables
            .consulting_firms
            .values()
            .find(|firm| firm.name == name)
            .cloned())
    }

    async fn list_consulting_firms(&self) -> AppResult<Vec<ConsultingFirm>> {
        let tables = self.tables.read().await;
        let mut firms: Vec<ConsultingFirm> = tables.consulting_firms.values().cloned().collect();
        firms.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(firms)
    }

    async fn delete_consulting_firm(&self, firm_id: ConsultingFirmId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.consulting_firms.remove(&firm_id).is_none() {
            return Err(missing("consulting firm", firm_id));
        }
        tables.delete_projects_where(|project| project.consulting_engineer_id == firm_id);
        Ok(())
    }
}

#[async_trait]
impl PrincipalContractorRepository for InMemoryStore {
    async fn create_principal_contractor(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor> {
        let mut tables = self.tables.write().await;
        let contractor = PrincipalContractor {
            id: PrincipalContractorId::new(tables.next_id()),
            name: contractor.name.trim().to_owned(),
            registration_number: contractor
                .registration_number
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        };
        tables
            .principal_contractors
            .insert(contractor.id, contractor.clone());
        Ok(contractor)
    }

    async fn find_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<Option<PrincipalContractor>> {
        Ok(self
            .tables
            .read()
            .await
            .principal_contractors
            .get(&contractor_id)
            .cloned())
    }

    async fn find_principal_contractor_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<PrincipalContractor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .principal_contractors
            .values()
            .find(|contractor| contractor.name == name)
            .cloned())
    }

    async fn list_principal_contractors(&self) -> AppResult<Vec<PrincipalContractor>> {
        let tables = self.tables.read().await;
        let mut contractors: Vec<PrincipalContractor> =
            tables.principal_contractors.values().cloned().collect();
        contractors.sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(contractors)
    }

    async fn delete_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.principal_contractors.remove(&contractor_id).is_none() {
            return Err(missing("principal contractor", contractor_id));
        }
        tables.delete_projects_where(|project| project.principal_contractor_id == contractor_id);
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create_project(&self, project: NewProject) -> AppResult<Project> {
        let mut tables = self.tables.write().await;

        let mut errors = ohs_audit_core::FieldErrors::new();
        if !tables.clients.contains_key(&project.client_id) {
            errors.add("client", INVALID_REFERENCE);
        }
        if !tables
            .consulting_firms
            .contains_key(&project.consulting_engineer_id)
        {
            errors.add("consulting_engineer", INVALID_REFERENCE);
        }
        if !tables
            .principal_contractors
            .contains_key(&project.principal_contractor_id)
        {
            errors.add("principal_contractor", INVALID_REFERENCE);
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let project = project.into_project(ProjectId::new(tables.next_id()));
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&project_id).cloned())
    }

    async fn find_project_by_permit_number(
        &self,
        permit_number: &str,
    ) -> AppResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .values()
            .find(|project| project.permit_number == permit_number)
            .cloned())
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let mut projects: Vec<Project> = tables.projects.values().cloned().collect();
        projects.sort_by(|left, right| left.title.cmp(&right.title).then(left.id.cmp(&right.id)));
        Ok(projects)
    }

    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&project_id) {
            return Err(missing("project", project_id));
        }
        tables.delete_project_cascade(project_id);
        Ok(())
    }
}

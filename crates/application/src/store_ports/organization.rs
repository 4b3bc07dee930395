use async_trait::async_trait;

use ohs_audit_core::AppResult;
use ohs_audit_domain::{
    Client, ClientId, ConsultingFirm, ConsultingFirmId, NewClient, NewConsultingFirm,
    NewPrincipalContractor, NewProject, PrincipalContractor, PrincipalContractorId, Project,
    ProjectId,
};

/// Repository port for client organizations.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Stores a new client and returns it with its key.
    async fn create_client(&self, client: NewClient) -> AppResult<Client>;

    /// Returns one client by key.
    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>>;

    /// Returns the first client with exactly this name.
    async fn find_client_by_name(&self, name: &str) -> AppResult<Option<Client>>;

    /// Lists every client ordered by name.
    async fn list_clients(&self) -> AppResult<Vec<Client>>;

    /// Overwrites a stored client. Fails with `NotFound` when it is gone.
    async fn update_client(&self, client: Client) -> AppResult<Client>;

    /// Deletes a client together with its projects and their audits.
    async fn delete_client(&self, client_id: ClientId) -> AppResult<()>;
}

/// Repository port for consulting engineering firms.
#[async_trait]
pub trait ConsultingFirmRepository: Send + Sync {
    /// Stores a new firm and returns it with its key.
    async fn create_consulting_firm(&self, firm: NewConsultingFirm) -> AppResult<ConsultingFirm>;

    /// Returns one firm by key.
    async fn find_consulting_firm(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<Option<ConsultingFirm>>;

    /// Returns the first firm with exactly this name.
    async fn find_consulting_firm_by_name(&self, name: &str)
    -> AppResult<Option<ConsultingFirm>>;

    /// Lists every firm ordered by name.
    async fn list_consulting_firms(&self) -> AppResult<Vec<ConsultingFirm>>;

    /// Deletes a firm together with its projects.
    async fn delete_consulting_firm(&self, firm_id: ConsultingFirmId) -> AppResult<()>;
}

/// Repository port for principal contractors.
#[async_trait]
pub trait PrincipalContractorRepository: Send + Sync {
    /// Stores a new contractor and returns it with its key.
    async fn create_principal_contractor(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor>;

    /// Returns one contractor by key.
    async fn find_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<Option<PrincipalContractor>>;

    /// Returns the first contractor with exactly this name.
    async fn find_principal_contractor_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<PrincipalContractor>>;

    /// Lists every contractor ordered by name.
    async fn list_principal_contractors(&self) -> AppResult<Vec<PrincipalContractor>>;

    /// Deletes a contractor together with its projects.
    async fn delete_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<()>;
}

/// Repository port for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project. Every referenced organization must exist.
    async fn create_project(&self, project: NewProject) -> AppResult<Project>;

    /// Returns one project by key.
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>>;

    /// Returns the first project with this permit number.
    async fn find_project_by_permit_number(
        &self,
        permit_number: &str,
    ) -> AppResult<Option<Project>>;

    /// Lists every project ordered by title.
    async fn list_projects(&self) -> AppResult<Vec<Project>>;

    /// Deletes a project together with its audits.
    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()>;
}

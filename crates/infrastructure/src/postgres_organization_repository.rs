//! PostgreSQL-backed repositories for clients, firms, contractors, and projects.

use async_trait::async_trait;
use sqlx::PgPool;

use ohs_audit_application::{
    ClientRepository, ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
};
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    Client, ClientId, ConsultingFirm, ConsultingFirmId, NewClient, NewConsultingFirm,
    NewPrincipalContractor, NewProject, PrincipalContractor, PrincipalContractorId, Project,
    ProjectId,
};

use crate::postgres_errors::{internal_error, write_error};

mod contractors;
mod projects;

/// PostgreSQL implementation of the organization and project ports.
#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    contact_name: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    address: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId::new(row.id),
            name: row.name,
            contact_name: row.contact_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            address: row.address,
        }
    }
}

const CLIENT_COLUMNS: &str = "id, name, contact_name, contact_email, contact_phone, address";

#[async_trait]
impl ClientRepository for PostgresOrganizationRepository {
    async fn create_client(&self, client: NewClient) -> AppResult<Client> {
        // Normalizes trimming and blank optionals the same way for every store.
        let client = client.into_client(ClientId::new(0));
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, contact_name, contact_email, contact_phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&client.name)
        .bind(&client.contact_name)
        .bind(&client.contact_email)
        .bind(&client.contact_phone)
        .bind(&client.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| internal_error(error, "create client"))?;

        Ok(row.into())
    }

    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(client_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find client"))?;

        Ok(row.map(Client::from))
    }

    async fn find_client_by_name(&self, name: &str) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find client by name"))?;

        Ok(row.map(Client::from))
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list clients"))?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn update_client(&self, client: Client) -> AppResult<Client> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            UPDATE clients
            SET name = $2, contact_name = $3, contact_email = $4, contact_phone = $5, address = $6
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(client.id.as_i64())
        .bind(&client.name)
        .bind(&client.contact_name)
        .bind(&client.contact_email)
        .bind(&client.contact_phone)
        .bind(&client.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "update client"))?;

        row.map(Client::from)
            .ok_or_else(|| AppError::NotFound(format!("client '{}' does not exist", client.id)))
    }

    async fn delete_client(&self, client_id: ClientId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete client"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "client '{client_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ConsultingFirmRepository for PostgresOrganizationRepository {
    async fn create_consulting_firm(&self, firm: NewConsultingFirm) -> AppResult<ConsultingFirm> {
        self.create_consulting_firm_impl(firm).await
    }

    async fn find_consulting_firm(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<Option<ConsultingFirm>> {
        self.find_consulting_firm_impl(firm_id).await
    }

    async fn find_consulting_firm_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<ConsultingFirm>> {
        self.find_consulting_firm_by_name_impl(name).await
    }

    async fn list_consulting_firms(&self) -> AppResult<Vec<ConsultingFirm>> {
        self.list_consulting_firms_impl().await
    }

    async fn delete_consulting_firm(&self, firm_id: ConsultingFirmId) -> AppResult<()> {
        self.delete_consulting_firm_impl(firm_id).await
    }
}

#[async_trait]
impl PrincipalContractorRepository for PostgresOrganizationRepository {
    async fn create_principal_contractor(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor> {
        self.create_principal_contractor_impl(contractor).await
    }

    async fn find_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<Option<PrincipalContractor>> {
        self.find_principal_contractor_impl(contractor_id).await
    }

    async fn find_principal_contractor_by_name(
        &self,
        name: &str,
    ) -> AppResult<Option<PrincipalContractor>> {
        self.find_principal_contractor_by_name_impl(name).await
    }

    async fn list_principal_contractors(&self) -> AppResult<Vec<PrincipalContractor>> {
        self.list_principal_contractors_impl().await
    }

    async fn delete_principal_contractor(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<()> {
        self.delete_principal_contractor_impl(contractor_id).await
    }
}

#[async_trait]
impl ProjectRepository for PostgresOrganizationRepository {
    async fn create_project(&self, project: NewProject) -> AppResult<Project> {
        self.create_project_impl(project).await
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        self.find_project_impl(project_id).await
    }

    async fn find_project_by_permit_number(
        &self,
        permit_number: &str,
    ) -> AppResult<Option<Project>> {
        self.find_project_by_permit_number_impl(permit_number).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.list_projects_impl().await
    }

    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        self.delete_project_impl(project_id).await
    }
}

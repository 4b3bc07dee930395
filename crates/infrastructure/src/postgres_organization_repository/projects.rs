use super::*;

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    permit_number: String,
    location: String,
    client_id: i64,
    consulting_engineer_id: i64,
    principal_contractor_id: i64,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            title: row.title,
            permit_number: row.permit_number,
            location: row.location,
            client_id: ClientId::new(row.client_id),
            consulting_engineer_id: ConsultingFirmId::new(row.consulting_engineer_id),
            principal_contractor_id: PrincipalContractorId::new(row.principal_contractor_id),
        }
    }
}

const PROJECT_COLUMNS: &str = "id, title, permit_number, location, client_id, \
                               consulting_engineer_id, principal_contractor_id";

impl PostgresOrganizationRepository {
    pub(super) async fn create_project_impl(&self, project: NewProject) -> AppResult<Project> {
        let project = project.into_project(ProjectId::new(0));
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (
                title, permit_number, location,
                client_id, consulting_engineer_id, principal_contractor_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&project.title)
        .bind(&project.permit_number)
        .bind(&project.location)
        .bind(project.client_id.as_i64())
        .bind(project.consulting_engineer_id.as_i64())
        .bind(project.principal_contractor_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "create project", "project already exists"))?;

        Ok(row.into())
    }

    pub(super) async fn find_project_impl(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(project_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find project"))?;

        Ok(row.map(Project::from))
    }

    pub(super) async fn find_project_by_permit_number_impl(
        &self,
        permit_number: &str,
    ) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE permit_number = $1 ORDER BY id LIMIT 1"
        ))
        .bind(permit_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find project by permit number"))?;

        Ok(row.map(Project::from))
    }

    pub(super) async fn list_projects_impl(&self) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY title, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list projects"))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    pub(super) async fn delete_project_impl(&self, project_id: ProjectId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete project"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "project '{project_id}' does not exist"
            )));
        }

        Ok(())
    }
}

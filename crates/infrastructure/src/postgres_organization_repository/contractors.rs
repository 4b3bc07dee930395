use super::*;

#[derive(Debug, sqlx::FromRow)]
struct ConsultingFirmRow {
    id: i64,
    name: String,
}

impl From<ConsultingFirmRow> for ConsultingFirm {
    fn from(row: ConsultingFirmRow) -> Self {
        Self {
            id: ConsultingFirmId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PrincipalContractorRow {
    id: i64,
    name: String,
    registration_number: Option<String>,
}

impl From<PrincipalContractorRow> for PrincipalContractor {
    fn from(row: PrincipalContractorRow) -> Self {
        Self {
            id: PrincipalContractorId::new(row.id),
            name: row.name,
            registration_number: row.registration_number,
        }
    }
}

impl PostgresOrganizationRepository {
    pub(super) async fn create_consulting_firm_impl(
        &self,
        firm: NewConsultingFirm,
    ) -> AppResult<ConsultingFirm> {
        let row = sqlx::query_as::<_, ConsultingFirmRow>(
            r#"
            INSERT INTO consulting_firms (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(firm.name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| internal_error(error, "create consulting firm"))?;

        Ok(row.into())
    }

    pub(super) async fn find_consulting_firm_impl(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<Option<ConsultingFirm>> {
        let row = sqlx::query_as::<_, ConsultingFirmRow>(
            "SELECT id, name FROM consulting_firms WHERE id = $1",
        )
        .bind(firm_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find consulting firm"))?;

        Ok(row.map(ConsultingFirm::from))
    }

    pub(super) async fn find_consulting_firm_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<ConsultingFirm>> {
        let row = sqlx::query_as::<_, ConsultingFirmRow>(
            "SELECT id, name FROM consulting_firms WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find consulting firm by name"))?;

        Ok(row.map(ConsultingFirm::from))
    }

    pub(super) async fn list_consulting_firms_impl(&self) -> AppResult<Vec<ConsultingFirm>> {
        let rows = sqlx::query_as::<_, ConsultingFirmRow>(
            "SELECT id, name FROM consulting_firms ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list consulting firms"))?;

        Ok(rows.into_iter().map(ConsultingFirm::from).collect())
    }

    pub(super) async fn delete_consulting_firm_impl(
        &self,
        firm_id: ConsultingFirmId,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM consulting_firms WHERE id = $1")
            .bind(firm_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete consulting firm"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "consulting firm '{firm_id}' does not exist"
            )));
        }

        Ok(())
    }

    pub(super) async fn create_principal_contractor_impl(
        &self,
        contractor: NewPrincipalContractor,
    ) -> AppResult<PrincipalContractor> {
        let registration_number = contractor
            .registration_number
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let row = sqlx::query_as::<_, PrincipalContractorRow>(
            r#"
            INSERT INTO principal_contractors (name, registration_number)
            VALUES ($1, $2)
            RETURNING id, name, registration_number
            "#,
        )
        .bind(contractor.name.trim())
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| internal_error(error, "create principal contractor"))?;

        Ok(row.into())
    }

    pub(super) async fn find_principal_contractor_impl(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<Option<PrincipalContractor>> {
        let row = sqlx::query_as::<_, PrincipalContractorRow>(
            "SELECT id, name, registration_number FROM principal_contractors WHERE id = $1",
        )
        .bind(contractor_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find principal contractor"))?;

        Ok(row.map(PrincipalContractor::from))
    }

    pub(super) async fn find_principal_contractor_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<PrincipalContractor>> {
        let row = sqlx::query_as::<_, PrincipalContractorRow>(
            r#"
            SELECT id, name, registration_number
            FROM principal_contractors
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find principal contractor by name"))?;

        Ok(row.map(PrincipalContractor::from))
    }

    pub(super) async fn list_principal_contractors_impl(
        &self,
    ) -> AppResult<Vec<PrincipalContractor>> {
        let rows = sqlx::query_as::<_, PrincipalContractorRow>(
            "SELECT id, name, registration_number FROM principal_contractors ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list principal contractors"))?;

        Ok(rows.into_iter().map(PrincipalContractor::from).collect())
    }

    pub(super) async fn delete_principal_contractor_impl(
        &self,
        contractor_id: PrincipalContractorId,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM principal_contractors WHERE id = $1")
            .bind(contractor_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete principal contractor"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "principal contractor '{contractor_id}' does not exist"
            )));
        }

        Ok(())
    }
}

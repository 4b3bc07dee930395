use super::*;

#[derive(Debug, sqlx::FromRow)]
struct SitePersonnelRow {
    id: i64,
    audit_id: i64,
    total_personnel: i32,
    management_count: Option<i32>,
    worker_count: Option<i32>,
    subcontractor_count: Option<i32>,
}

impl From<SitePersonnelRow> for SitePersonnel {
    fn from(row: SitePersonnelRow) -> Self {
        Self {
            id: SitePersonnelId::new(row.id),
            audit_id: AuditId::new(row.audit_id),
            total_personnel: row.total_personnel,
            management_count: row.management_count,
            worker_count: row.worker_count,
            subcontractor_count: row.subcontractor_count,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VisualObservationRow {
    id: i64,
    audit_id: i64,
    description: String,
    observation_type: Option<String>,
    photo_reference: Option<String>,
    date_recorded: DateTime<Utc>,
}

impl From<VisualObservationRow> for VisualObservation {
    fn from(row: VisualObservationRow) -> Self {
        Self {
            id: VisualObservationId::new(row.id),
            audit_id: AuditId::new(row.audit_id),
            description: row.description,
            observation_type: row.observation_type,
            photo_reference: row.photo_reference,
            date_recorded: row.date_recorded,
        }
    }
}

const OBSERVATION_COLUMNS: &str =
    "id, audit_id, description, observation_type, photo_reference, date_recorded";

impl PostgresFollowUpRepository {
    pub(super) async fn save_site_personnel_impl(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel> {
        let row = sqlx::query_as::<_, SitePersonnelRow>(
            r#"
            INSERT INTO site_personnel (
                audit_id, total_personnel, management_count, worker_count, subcontractor_count
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (audit_id) DO UPDATE
            SET total_personnel = EXCLUDED.total_personnel,
                management_count = EXCLUDED.management_count,
                worker_count = EXCLUDED.worker_count,
                subcontractor_count = EXCLUDED.subcontractor_count
            RETURNING id, audit_id, total_personnel, management_count, worker_count,
                      subcontractor_count
            "#,
        )
        .bind(audit_id.as_i64())
        .bind(counts.total_personnel)
        .bind(counts.management_count)
        .bind(counts.worker_count)
        .bind(counts.subcontractor_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            write_error(error, "save site personnel", "site personnel already exists")
        })?;

        Ok(row.into())
    }

    pub(super) async fn find_site_personnel_impl(
        &self,
        audit_id: AuditId,
    ) -> AppResult<Option<SitePersonnel>> {
        let row = sqlx::query_as::<_, SitePersonnelRow>(
            r#"
            SELECT id, audit_id, total_personnel, management_count, worker_count,
                   subcontractor_count
            FROM site_personnel
            WHERE audit_id = $1
            "#,
        )
        .bind(audit_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find site personnel"))?;

        Ok(row.map(SitePersonnel::from))
    }

    pub(super) async fn delete_site_personnel_impl(&self, audit_id: AuditId) -> AppResult<()> {
        sqlx::query("DELETE FROM site_personnel WHERE audit_id = $1")
            .bind(audit_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete site personnel"))?;

        Ok(())
    }

    pub(super) async fn record_observation_impl(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation> {
        // `date_recorded` comes from the column default so the database clock stamps it.
        let draft = observation.into_observation(VisualObservationId::new(0), Utc::now());
        let row = sqlx::query_as::<_, VisualObservationRow>(&format!(
            r#"
            INSERT INTO visual_observations (audit_id, description, observation_type, photo_reference)
            VALUES ($1, $2, $3, $4)
            RETURNING {OBSERVATION_COLUMNS}
            "#
        ))
        .bind(draft.audit_id.as_i64())
        .bind(&draft.description)
        .bind(&draft.observation_type)
        .bind(&draft.photo_reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            write_error(error, "record visual observation", "observation already exists")
        })?;

        Ok(row.into())
    }

    pub(super) async fn list_observations_impl(
        &self,
        audit_id: AuditId,
    ) -> AppResult<Vec<VisualObservation>> {
        let rows = sqlx::query_as::<_, VisualObservationRow>(&format!(
            r#"
            SELECT {OBSERVATION_COLUMNS}
            FROM visual_observations
            WHERE audit_id = $1
            ORDER BY date_recorded, id
            "#
        ))
        .bind(audit_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list visual observations"))?;

        Ok(rows.into_iter().map(VisualObservation::from).collect())
    }

    pub(super) async fn update_observation_impl(
        &self,
        observation: VisualObservation,
    ) -> AppResult<VisualObservation> {
        let row = sqlx::query_as::<_, VisualObservationRow>(&format!(
            r#"
            UPDATE visual_observations
            SET description = $2, observation_type = $3, photo_reference = $4
            WHERE id = $1
            RETURNING {OBSERVATION_COLUMNS}
            "#
        ))
        .bind(observation.id.as_i64())
        .bind(&observation.description)
        .bind(&observation.observation_type)
        .bind(&observation.photo_reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "update visual observation"))?;

        row.map(VisualObservation::from).ok_or_else(|| {
            AppError::NotFound(format!(
                "visual observation '{}' does not exist",
                observation.id
            ))
        })
    }

    pub(super) async fn delete_observation_impl(
        &self,
        observation_id: VisualObservationId,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM visual_observations WHERE id = $1")
            .bind(observation_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete visual observation"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "visual observation '{observation_id}' does not exist"
            )));
        }

        Ok(())
    }
}

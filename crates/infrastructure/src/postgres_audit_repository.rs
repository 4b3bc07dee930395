//! PostgreSQL-backed audit repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use ohs_audit_application::AuditRepository;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    Audit, AuditId, AuditSummary, AuditType, NewAudit, Percentage, ProjectId,
};

use crate::postgres_errors::{internal_error, write_error};

/// PostgreSQL implementation of the audit repository port.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditRow {
    id: i64,
    project_id: i64,
    audit_date: NaiveDate,
    audit_type: String,
    audit_number: String,
    performed_by: String,
    report_number: String,
    overall_score_percentage: Decimal,
    standard_required: Decimal,
    improvement_notices: i32,
    contravention_notices: i32,
    prohibition_notices: i32,
}

impl TryFrom<AuditRow> for Audit {
    type Error = AppError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AuditId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            audit_date: row.audit_date,
            audit_type: stored_audit_type(&row.audit_type)?,
            audit_number: row.audit_number,
            performed_by: row.performed_by,
            report_number: row.report_number,
            overall_score_percentage: stored_percentage(row.overall_score_percentage)?,
            standard_required: stored_percentage(row.standard_required)?,
            improvement_notices: row.improvement_notices,
            contravention_notices: row.contravention_notices,
            prohibition_notices: row.prohibition_notices,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditSummaryRow {
    id: i64,
    audit_date: NaiveDate,
    audit_type: String,
    audit_number: String,
    report_number: String,
    performed_by: String,
    overall_score_percentage: Decimal,
    project_id: i64,
    project_title: String,
    client_name: String,
}

impl TryFrom<AuditSummaryRow> for AuditSummary {
    type Error = AppError;

    fn try_from(row: AuditSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AuditId::new(row.id),
            audit_date: row.audit_date,
            audit_type: stored_audit_type(&row.audit_type)?,
            audit_number: row.audit_number,
            report_number: row.report_number,
            performed_by: row.performed_by,
            overall_score_percentage: stored_percentage(row.overall_score_percentage)?,
            project_id: ProjectId::new(row.project_id),
            project_title: row.project_title,
            client_name: row.client_name,
        })
    }
}

fn stored_audit_type(value: &str) -> AppResult<AuditType> {
    AuditType::parse(value)
        .ok_or_else(|| AppError::Internal(format!("unknown stored audit type '{value}'")))
}

fn stored_percentage(value: Decimal) -> AppResult<Percentage> {
    Percentage::new(value)
        .map_err(|error| AppError::Internal(format!("invalid stored percentage {value}: {error}")))
}

const AUDIT_COLUMNS: &str = "id, project_id, audit_date, audit_type, audit_number, \
                             performed_by, report_number, overall_score_percentage, \
                             standard_required, improvement_notices, contravention_notices, \
                             prohibition_notices";

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn create_audit(&self, audit: NewAudit) -> AppResult<Audit> {
        let row = sqlx::query_as::<_, AuditRow>(&format!(
            r#"
            INSERT INTO audits (
                project_id, audit_date, audit_type, audit_number, performed_by,
                report_number, overall_score_percentage, standard_required,
                improvement_notices, contravention_notices, prohibition_notices
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {AUDIT_COLUMNS}
            "#
        ))
        .bind(audit.project_id.as_i64())
        .bind(audit.audit_date)
        .bind(audit.audit_type.as_str())
        .bind(audit.audit_number.trim())
        .bind(audit.performed_by.trim())
        .bind(audit.report_number.trim())
        .bind(audit.overall_score_percentage.value())
        .bind(audit.standard_required.value())
        .bind(audit.improvement_notices)
        .bind(audit.contravention_notices)
        .bind(audit.prohibition_notices)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "create audit", "audit already exists"))?;

        Audit::try_from(row)
    }

    async fn find_audit(&self, audit_id: AuditId) -> AppResult<Option<Audit>> {
        let row = sqlx::query_as::<_, AuditRow>(&format!(
            "SELECT {AUDIT_COLUMNS} FROM audits WHERE id = $1"
        ))
        .bind(audit_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find audit"))?;

        row.map(Audit::try_from).transpose()
    }

    async fn find_audit_by_report_number(
        &self,
        report_number: &str,
    ) -> AppResult<Option<Audit>> {
        let row = sqlx::query_as::<_, AuditRow>(&format!(
            "SELECT {AUDIT_COLUMNS} FROM audits WHERE report_number = $1 ORDER BY id DESC LIMIT 1"
        ))
        .bind(report_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find audit by report number"))?;

        row.map(Audit::try_from).transpose()
    }

    async fn count_audits(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audits")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| internal_error(error, "count audits"))?;

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid audit count {count}: {error}")))
    }

    async fn list_audit_summaries(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<AuditSummary>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, AuditSummaryRow>(
            r#"
            SELECT audits.id, audits.audit_date, audits.audit_type, audits.audit_number,
                   audits.report_number, audits.performed_by, audits.overall_score_percentage,
                   projects.id AS project_id, projects.title AS project_title,
                   clients.name AS client_name
            FROM audits
            JOIN projects ON projects.id = audits.project_id
            JOIN clients ON clients.id = projects.client_id
            ORDER BY audits.audit_date DESC, audits.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list audit summaries"))?;

        rows.into_iter().map(AuditSummary::try_from).collect()
    }

    async fn update_audit(&self, audit: Audit) -> AppResult<Audit> {
        let row = sqlx::query_as::<_, AuditRow>(&format!(
            r#"
            UPDATE audits
            SET project_id = $2, audit_date = $3, audit_type = $4, audit_number = $5,
                performed_by = $6, report_number = $7, overall_score_percentage = $8,
                standard_required = $9, improvement_notices = $10,
                contravention_notices = $11, prohibition_notices = $12
            WHERE id = $1
            RETURNING {AUDIT_COLUMNS}
            "#
        ))
        .bind(audit.id.as_i64())
        .bind(audit.project_id.as_i64())
        .bind(audit.audit_date)
        .bind(audit.audit_type.as_str())
        .bind(&audit.audit_number)
        .bind(&audit.performed_by)
        .bind(&audit.report_number)
        .bind(audit.overall_score_percentage.value())
        .bind(audit.standard_required.value())
        .bind(audit.improvement_notices)
        .bind(audit.contravention_notices)
        .bind(audit.prohibition_notices)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| write_error(error, "update audit", "audit already exists"))?;

        row.map(Audit::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound(format!("audit '{}' does not exist", audit.id)))
    }

    async fn delete_audit(&self, audit_id: AuditId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM audits WHERE id = $1")
            .bind(audit_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete audit"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "audit '{audit_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

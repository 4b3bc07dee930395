//! PostgreSQL-backed checklist repository.
//!
//! The `(audit_id, category, item_type)` unique constraint decides duplicates,
//! so two concurrent inserts of the same row cannot both succeed.

use async_trait::async_trait;
use sqlx::PgPool;

use ohs_audit_application::ChecklistRepository;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    AuditId, ChecklistCategory, ChecklistItem, ChecklistItemId, ComplianceScore, NewChecklistItem,
};

use crate::postgres_errors::{internal_error, write_error};

/// PostgreSQL implementation of the checklist repository port.
#[derive(Clone)]
pub struct PostgresChecklistRepository {
    pool: PgPool,
}

impl PostgresChecklistRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ChecklistItemRow {
    id: i64,
    audit_id: i64,
    category: String,
    item_type: String,
    required_score: i16,
    actual_score: i16,
    appointed_person: Option<String>,
    comments: Option<String>,
}

impl TryFrom<ChecklistItemRow> for ChecklistItem {
    type Error = AppError;

    fn try_from(row: ChecklistItemRow) -> Result<Self, Self::Error> {
        let category = ChecklistCategory::parse(&row.category).ok_or_else(|| {
            AppError::Internal(format!("unknown stored checklist section '{}'", row.category))
        })?;

        Ok(Self {
            id: ChecklistItemId::new(row.id),
            audit_id: AuditId::new(row.audit_id),
            category,
            item_type: row.item_type,
            required_score: stored_score(row.required_score)?,
            actual_score: stored_score(row.actual_score)?,
            appointed_person: row.appointed_person,
            comments: row.comments,
        })
    }
}

fn stored_score(value: i16) -> AppResult<ComplianceScore> {
    ComplianceScore::from_value(value)
        .ok_or_else(|| AppError::Internal(format!("invalid stored compliance score {value}")))
}

fn duplicate_message(audit_id: AuditId, category: ChecklistCategory, item_type: &str) -> String {
    format!(
        "audit '{audit_id}' already has a {} row for '{item_type}'",
        category.as_str()
    )
}

const CHECKLIST_COLUMNS: &str = "id, audit_id, category, item_type, required_score, \
                                 actual_score, appointed_person, comments";

#[async_trait]
impl ChecklistRepository for PostgresChecklistRepository {
    async fn add_checklist_item(&self, item: NewChecklistItem) -> AppResult<ChecklistItem> {
        let conflict = duplicate_message(item.audit_id, item.category, &item.item_type);
        let item = item.into_item(ChecklistItemId::new(0));

        let row = sqlx::query_as::<_, ChecklistItemRow>(&format!(
            r#"
            INSERT INTO checklist_items (
                audit_id, category, item_type, required_score, actual_score,
                appointed_person, comments
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CHECKLIST_COLUMNS}
            "#
        ))
        .bind(item.audit_id.as_i64())
        .bind(item.category.as_str())
        .bind(&item.item_type)
        .bind(item.required_score.value())
        .bind(item.actual_score.value())
        .bind(&item.appointed_person)
        .bind(&item.comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "add checklist item", &conflict))?;

        ChecklistItem::try_from(row)
    }

    async fn find_checklist_item(
        &self,
        item_id: ChecklistItemId,
    ) -> AppResult<Option<ChecklistItem>> {
        let row = sqlx::query_as::<_, ChecklistItemRow>(&format!(
            "SELECT {CHECKLIST_COLUMNS} FROM checklist_items WHERE id = $1"
        ))
        .bind(item_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find checklist item"))?;

        row.map(ChecklistItem::try_from).transpose()
    }

    async fn list_checklist_items(&self, audit_id: AuditId) -> AppResult<Vec<ChecklistItem>> {
        let rows = sqlx::query_as::<_, ChecklistItemRow>(&format!(
            "SELECT {CHECKLIST_COLUMNS} FROM checklist_items WHERE audit_id = $1 ORDER BY id"
        ))
        .bind(audit_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list checklist items"))?;

        rows.into_iter().map(ChecklistItem::try_from).collect()
    }

    async fn update_checklist_item(&self, item: ChecklistItem) -> AppResult<ChecklistItem> {
        let conflict = duplicate_message(item.audit_id, item.category, &item.item_type);
        let row = sqlx::query_as::<_, ChecklistItemRow>(&format!(
            r#"
            UPDATE checklist_items
            SET audit_id = $2, category = $3, item_type = $4, required_score = $5,
                actual_score = $6, appointed_person = $7, comments = $8
            WHERE id = $1
            RETURNING {CHECKLIST_COLUMNS}
            "#
        ))
        .bind(item.id.as_i64())
        .bind(item.audit_id.as_i64())
        .bind(item.category.as_str())
        .bind(&item.item_type)
        .bind(item.required_score.value())
        .bind(item.actual_score.value())
        .bind(&item.appointed_person)
        .bind(&item.comments)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| write_error(error, "update checklist item", &conflict))?;

        row.map(ChecklistItem::try_from).transpose()?.ok_or_else(|| {
            AppError::NotFound(format!("checklist item '{}' does not exist", item.id))
        })
    }

    async fn delete_checklist_item(&self, item_id: ChecklistItemId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(item_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete checklist item"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "checklist item '{item_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ohs_audit_application::{AuditRepository, ChecklistRepository};
    use ohs_audit_core::{AppError, AppResult};
    use ohs_audit_domain::{ChecklistCategory, ComplianceScore, NewChecklistItem};

    use super::PostgresChecklistRepository;
    use crate::PostgresAuditRepository;
    use crate::postgres_test_support::{sample_audit, seed_project, test_pool};

    #[tokio::test]
    async fn concurrent_duplicate_rows_store_exactly_one() -> AppResult<()> {
        let Some(pool) = test_pool().await else {
            return Ok(());
        };

        let project = seed_project(&pool).await?;
        let audit = PostgresAuditRepository::new(pool.clone())
            .create_audit(sample_audit(project.id, "PG-CHECKLIST-1"))
            .await?;
        let repository = Arc::new(PostgresChecklistRepository::new(pool));

        let audit_id = audit.id;
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .add_checklist_item(NewChecklistItem::scored(
                            audit_id,
                            ChecklistCategory::LegalAppointment,
                            "CEO_16_1",
                            ComplianceScore::Partial,
                        ))
                        .await
                })
            })
            .collect();

        let mut stored = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(_)) => stored += 1,
                Ok(Err(AppError::Conflict(_))) => {}
                Ok(Err(error)) => panic!("unexpected store error: {error}"),
                Err(error) => panic!("insert task failed: {error}"),
            }
        }

        assert_eq!(stored, 1);
        assert_eq!(repository.list_checklist_items(audit.id).await?.len(), 1);
        Ok(())
    }
}

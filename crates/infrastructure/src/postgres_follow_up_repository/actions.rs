use super::*;

#[derive(Debug, sqlx::FromRow)]
struct ActionItemRow {
    id: i64,
    audit_id: i64,
    description: String,
    regulation_reference: Option<String>,
    assigned_to: String,
    risk_rating_id: Option<i64>,
    due_date: Option<NaiveDate>,
    completed: bool,
    completion_date: Option<NaiveDate>,
    comments: Option<String>,
}

impl From<ActionItemRow> for ActionItem {
    fn from(row: ActionItemRow) -> Self {
        Self {
            id: ActionItemId::new(row.id),
            audit_id: AuditId::new(row.audit_id),
            description: row.description,
            regulation_reference: row.regulation_reference,
            assigned_to: row.assigned_to,
            risk_rating_id: row.risk_rating_id.map(RiskRatingId::new),
            due_date: row.due_date,
            completed: row.completed,
            completion_date: row.completion_date,
            comments: row.comments,
        }
    }
}

const ACTION_COLUMNS: &str = "id, audit_id, description, regulation_reference, assigned_to, \
                              risk_rating_id, due_date, completed, completion_date, comments";

impl PostgresFollowUpRepository {
    pub(super) async fn create_action_item_impl(
        &self,
        item: NewActionItem,
    ) -> AppResult<ActionItem> {
        let item = item.into_action_item(ActionItemId::new(0));
        let row = sqlx::query_as::<_, ActionItemRow>(&format!(
            r#"
            INSERT INTO action_items (
                audit_id, description, regulation_reference, assigned_to,
                risk_rating_id, due_date, completed, completion_date, comments
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ACTION_COLUMNS}
            "#
        ))
        .bind(item.audit_id.as_i64())
        .bind(&item.description)
        .bind(&item.regulation_reference)
        .bind(&item.assigned_to)
        .bind(item.risk_rating_id.map(RiskRatingId::as_i64))
        .bind(item.due_date)
        .bind(item.completed)
        .bind(item.completion_date)
        .bind(&item.comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "create action item", "action item already exists"))?;

        Ok(row.into())
    }

    pub(super) async fn find_action_item_impl(
        &self,
        item_id: ActionItemId,
    ) -> AppResult<Option<ActionItem>> {
        let row = sqlx::query_as::<_, ActionItemRow>(&format!(
            "SELECT {ACTION_COLUMNS} FROM action_items WHERE id = $1"
        ))
        .bind(item_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find action item"))?;

        Ok(row.map(ActionItem::from))
    }

    pub(super) async fn list_action_items_impl(
        &self,
        audit_id: AuditId,
    ) -> AppResult<Vec<ActionItem>> {
        let rows = sqlx::query_as::<_, ActionItemRow>(&format!(
            "SELECT {ACTION_COLUMNS} FROM action_items WHERE audit_id = $1 ORDER BY id"
        ))
        .bind(audit_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list action items"))?;

        Ok(rows.into_iter().map(ActionItem::from).collect())
    }

    pub(super) async fn update_action_item_impl(&self, item: ActionItem) -> AppResult<ActionItem> {
        let row = sqlx::query_as::<_, ActionItemRow>(&format!(
            r#"
            UPDATE action_items
            SET description = $2, regulation_reference = $3, assigned_to = $4,
                risk_rating_id = $5, due_date = $6, completed = $7,
                completion_date = $8, comments = $9
            WHERE id = $1
            RETURNING {ACTION_COLUMNS}
            "#
        ))
        .bind(item.id.as_i64())
        .bind(&item.description)
        .bind(&item.regulation_reference)
        .bind(&item.assigned_to)
        .bind(item.risk_rating_id.map(RiskRatingId::as_i64))
        .bind(item.due_date)
        .bind(item.completed)
        .bind(item.completion_date)
        .bind(&item.comments)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| write_error(error, "update action item", "action item already exists"))?;

        row.map(ActionItem::from)
            .ok_or_else(|| AppError::NotFound(format!("action item '{}' does not exist", item.id)))
    }

    pub(super) async fn delete_action_item_impl(&self, item_id: ActionItemId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM action_items WHERE id = $1")
            .bind(item_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete action item"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "action item '{item_id}' does not exist"
            )));
        }

        Ok(())
    }
}

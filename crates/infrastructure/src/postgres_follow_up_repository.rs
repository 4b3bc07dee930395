//! PostgreSQL-backed repositories for risk ratings, action items, site
//! personnel, and visual observations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use ohs_audit_application::{
    ActionItemRepository, RiskRatingRepository, SitePersonnelRepository,
    VisualObservationRepository,
};
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    ActionItem, ActionItemId, AuditId, NewActionItem, NewRiskRating, NewVisualObservation,
    RiskLevel, RiskRating, RiskRatingId, SitePersonnel, SitePersonnelCounts, SitePersonnelId,
    VisualObservation, VisualObservationId,
};

use crate::postgres_errors::{internal_error, write_error};

mod actions;
mod site;

/// PostgreSQL implementation of the audit follow-up ports.
#[derive(Clone)]
pub struct PostgresFollowUpRepository {
    pool: PgPool,
}

impl PostgresFollowUpRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RiskRatingRow {
    id: i64,
    level: String,
    time_frame: String,
}

impl TryFrom<RiskRatingRow> for RiskRating {
    type Error = AppError;

    fn try_from(row: RiskRatingRow) -> Result<Self, Self::Error> {
        let level = RiskLevel::parse(&row.level).ok_or_else(|| {
            AppError::Internal(format!("unknown stored risk level '{}'", row.level))
        })?;

        Ok(Self {
            id: RiskRatingId::new(row.id),
            level,
            time_frame: row.time_frame,
        })
    }
}

fn level_taken(level: RiskLevel) -> String {
    format!("risk level '{}' already has a rating", level.as_str())
}

#[async_trait]
impl RiskRatingRepository for PostgresFollowUpRepository {
    async fn create_risk_rating(&self, rating: NewRiskRating) -> AppResult<RiskRating> {
        let row = sqlx::query_as::<_, RiskRatingRow>(
            r#"
            INSERT INTO risk_ratings (level, time_frame)
            VALUES ($1, $2)
            RETURNING id, level, time_frame
            "#,
        )
        .bind(rating.level.as_str())
        .bind(rating.time_frame.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| write_error(error, "create risk rating", &level_taken(rating.level)))?;

        RiskRating::try_from(row)
    }

    async fn find_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<Option<RiskRating>> {
        let row = sqlx::query_as::<_, RiskRatingRow>(
            "SELECT id, level, time_frame FROM risk_ratings WHERE id = $1",
        )
        .bind(rating_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find risk rating"))?;

        row.map(RiskRating::try_from).transpose()
    }

    async fn find_risk_rating_by_level(&self, level: RiskLevel) -> AppResult<Option<RiskRating>> {
        let row = sqlx::query_as::<_, RiskRatingRow>(
            "SELECT id, level, time_frame FROM risk_ratings WHERE level = $1",
        )
        .bind(level.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| internal_error(error, "find risk rating by level"))?;

        row.map(RiskRating::try_from).transpose()
    }

    async fn list_risk_ratings(&self) -> AppResult<Vec<RiskRating>> {
        let rows = sqlx::query_as::<_, RiskRatingRow>(
            r#"
            SELECT id, level, time_frame
            FROM risk_ratings
            ORDER BY CASE level
                WHEN 'CRITICAL' THEN 0
                WHEN 'HIGH' THEN 1
                WHEN 'MEDIUM' THEN 2
                ELSE 3
            END
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| internal_error(error, "list risk ratings"))?;

        rows.into_iter().map(RiskRating::try_from).collect()
    }

    async fn update_risk_rating(&self, rating: RiskRating) -> AppResult<RiskRating> {
        let row = sqlx::query_as::<_, RiskRatingRow>(
            r#"
            UPDATE risk_ratings
            SET level = $2, time_frame = $3
            WHERE id = $1
            RETURNING id, level, time_frame
            "#,
        )
        .bind(rating.id.as_i64())
        .bind(rating.level.as_str())
        .bind(rating.time_frame.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| write_error(error, "update risk rating", &level_taken(rating.level)))?;

        row.map(RiskRating::try_from).transpose()?.ok_or_else(|| {
            AppError::NotFound(format!("risk rating '{}' does not exist", rating.id))
        })
    }

    async fn delete_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM risk_ratings WHERE id = $1")
            .bind(rating_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| internal_error(error, "delete risk rating"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "risk rating '{rating_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ActionItemRepository for PostgresFollowUpRepository {
    async fn create_action_item(&self, item: NewActionItem) -> AppResult<ActionItem> {
        self.create_action_item_impl(item).await
    }

    async fn find_action_item(&self, item_id: ActionItemId) -> AppResult<Option<ActionItem>> {
        self.find_action_item_impl(item_id).await
    }

    async fn list_action_items(&self, audit_id: AuditId) -> AppResult<Vec<ActionItem>> {
        self.list_action_items_impl(audit_id).await
    }

    async fn update_action_item(&self, item: ActionItem) -> AppResult<ActionItem> {
        self.update_action_item_impl(item).await
    }

    async fn delete_action_item(&self, item_id: ActionItemId) -> AppResult<()> {
        self.delete_action_item_impl(item_id).await
    }
}

#[async_trait]
impl SitePersonnelRepository for PostgresFollowUpRepository {
    async fn save_site_personnel(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel> {
        self.save_site_personnel_impl(audit_id, counts).await
    }

    async fn find_site_personnel(&self, audit_id: AuditId) -> AppResult<Option<SitePersonnel>> {
        self.find_site_personnel_impl(audit_id).await
    }

    async fn delete_site_personnel(&self, audit_id: AuditId) -> AppResult<()> {
        self.delete_site_personnel_impl(audit_id).await
    }
}

#[async_trait]
impl VisualObservationRepository for PostgresFollowUpRepository {
    async fn record_observation(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation> {
        self.record_observation_impl(observation).await
    }

    async fn list_observations(&self, audit_id: AuditId) -> AppResult<Vec<VisualObservation>> {
        self.list_observations_impl(audit_id).await
    }

    async fn update_observation(
        &self,
        observation: VisualObservation,
    ) -> AppResult<VisualObservation> {
        self.update_observation_impl(observation).await
    }

    async fn delete_observation(&self, observation_id: VisualObservationId) -> AppResult<()> {
        self.delete_observation_impl(observation_id).await
    }
}

#[cfg(test)]
mod tests;

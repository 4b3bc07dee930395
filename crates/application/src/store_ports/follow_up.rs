use async_trait::async_trait;

use ohs_audit_core::AppResult;
use ohs_audit_domain::{
    ActionItem, ActionItemId, AuditId, NewActionItem, NewRiskRating, NewVisualObservation,
    RiskLevel, RiskRating, RiskRatingId, SitePersonnel, SitePersonnelCounts, VisualObservation,
    VisualObservationId,
};

/// Repository port for the global risk rating table.
#[async_trait]
pub trait RiskRatingRepository: Send + Sync {
    /// Stores a rating. A second rating for the same level is a `Conflict`.
    async fn create_risk_rating(&self, rating: NewRiskRating) -> AppResult<RiskRating>;

    /// Returns one rating by key.
    async fn find_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<Option<RiskRating>>;

    /// Returns the rating of a level.
    async fn find_risk_rating_by_level(&self, level: RiskLevel) -> AppResult<Option<RiskRating>>;

    /// Lists every rating from most to least severe.
    async fn list_risk_ratings(&self) -> AppResult<Vec<RiskRating>>;

    /// Changes the time frame of a stored rating.
    async fn update_risk_rating(&self, rating: RiskRating) -> AppResult<RiskRating>;

    /// Deletes a rating and clears it from every action item.
    async fn delete_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<()>;
}

/// Repository port for corrective action items.
#[async_trait]
pub trait ActionItemRepository: Send + Sync {
    /// Stores a new action. The audit and rating must exist.
    async fn create_action_item(&self, item: NewActionItem) -> AppResult<ActionItem>;

    /// Returns one action by key.
    async fn find_action_item(&self, item_id: ActionItemId) -> AppResult<Option<ActionItem>>;

    /// Lists the actions of one audit in insertion order.
    async fn list_action_items(&self, audit_id: AuditId) -> AppResult<Vec<ActionItem>>;

    /// Overwrites a stored action.
    async fn update_action_item(&self, item: ActionItem) -> AppResult<ActionItem>;

    /// Deletes one action.
    async fn delete_action_item(&self, item_id: ActionItemId) -> AppResult<()>;
}

/// Repository port for the single head count of an audit.
#[async_trait]
pub trait SitePersonnelRepository: Send + Sync {
    /// Creates or replaces the head count of an audit.
    async fn save_site_personnel(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel>;

    /// Returns the head count of an audit.
    async fn find_site_personnel(&self, audit_id: AuditId) -> AppResult<Option<SitePersonnel>>;

    /// Deletes the head count of an audit.
    async fn delete_site_personnel(&self, audit_id: AuditId) -> AppResult<()>;
}

/// Repository port for visual observations.
#[async_trait]
pub trait VisualObservationRepository: Send + Sync {
    /// Stores an observation, stamping `date_recorded` with the current time.
    async fn record_observation(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation>;

    /// Lists the observations of one audit, oldest first.
    async fn list_observations(&self, audit_id: AuditId) -> AppResult<Vec<VisualObservation>>;

    /// Changes the text fields of a stored observation. The timestamp is kept.
    async fn update_observation(
        &self,
        observation: VisualObservation,
    ) -> AppResult<VisualObservation>;

    /// Deletes one observation.
    async fn delete_observation(&self, observation_id: VisualObservationId) -> AppResult<()>;
}

//! Records attached to an existing audit: checklist rows, corrective actions,
//! site head count, and visual observations. Also owns the global risk rating
//! table those actions refer to.

use std::sync::Arc;

use chrono::NaiveDate;
use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{
    ActionItem, ActionItemId, AuditId, ChecklistItem, ChecklistItemId, ComplianceScore,
    NewActionItem, NewChecklistItem, NewRiskRating, NewVisualObservation, RiskRating,
    SitePersonnel, SitePersonnelCounts, VisualObservation,
};
use tracing::info;

use crate::{
    ActionItemRepository, AuditRepository, ChecklistRepository, RiskRatingRepository,
    SitePersonnelRepository, VisualObservationRepository,
};

/// Application service for audit follow-up records.
#[derive(Clone)]
pub struct FollowUpService {
    audits: Arc<dyn AuditRepository>,
    checklist: Arc<dyn ChecklistRepository>,
    risk_ratings: Arc<dyn RiskRatingRepository>,
    action_items: Arc<dyn ActionItemRepository>,
    site_personnel: Arc<dyn SitePersonnelRepository>,
    observations: Arc<dyn VisualObservationRepository>,
}

impl FollowUpService {
    /// Creates a new follow-up service.
    #[must_use]
    pub fn new(
        audits: Arc<dyn AuditRepository>,
        checklist: Arc<dyn ChecklistRepository>,
        risk_ratings: Arc<dyn RiskRatingRepository>,
        action_items: Arc<dyn ActionItemRepository>,
        site_personnel: Arc<dyn SitePersonnelRepository>,
        observations: Arc<dyn VisualObservationRepository>,
    ) -> Self {
        Self {
            audits,
            checklist,
            risk_ratings,
            action_items,
            site_personnel,
            observations,
        }
    }

    /// Records a checklist row.
    ///
    /// A row for an item already scored on this audit fails with `Conflict`;
    /// the stored row is never overwritten.
    pub async fn record_checklist_item(&self, item: NewChecklistItem) -> AppResult<ChecklistItem> {
        item.validate()?;
        self.require_audit(item.audit_id).await?;
        self.checklist.add_checklist_item(item).await
    }

    /// Changes the scores and comments of a stored checklist row.
    pub async fn rescore_checklist_item(
        &self,
        item_id: ChecklistItemId,
        actual_score: ComplianceScore,
        comments: Option<String>,
    ) -> AppResult<ChecklistItem> {
        let mut item = self
            .checklist
            .find_checklist_item(item_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("checklist item '{item_id}' does not exist"))
            })?;

        item.actual_score = actual_score;
        item.comments = comments.filter(|text| !text.trim().is_empty());
        self.checklist.update_checklist_item(item).await
    }

    /// Sets the time frame of a risk level, creating the rating when missing.
    pub async fn save_risk_rating(&self, rating: NewRiskRating) -> AppResult<RiskRating> {
        rating.validate()?;
        match self
            .risk_ratings
            .find_risk_rating_by_level(rating.level)
            .await?
        {
            Some(mut existing) => {
                existing.time_frame = rating.time_frame.trim().to_owned();
                self.risk_ratings.update_risk_rating(existing).await
            }
            None => self.risk_ratings.create_risk_rating(rating).await,
        }
    }

    /// Lists every risk rating.
    pub async fn list_risk_ratings(&self) -> AppResult<Vec<RiskRating>> {
        self.risk_ratings.list_risk_ratings().await
    }

    /// Raises a corrective action on an audit.
    pub async fn add_action_item(&self, item: NewActionItem) -> AppResult<ActionItem> {
        item.validate()?;
        self.require_audit(item.audit_id).await?;
        if let Some(rating_id) = item.risk_rating_id
            && self.risk_ratings.find_risk_rating(rating_id).await?.is_none()
        {
            return Err(AppError::field(
                "risk_rating",
                ohs_audit_domain::input::INVALID_REFERENCE,
            ));
        }

        let item = self.action_items.create_action_item(item).await?;
        info!(action_item_id = %item.id, audit_id = %item.audit_id, "action item raised");
        Ok(item)
    }

    /// Marks an action done on the given day.
    pub async fn complete_action_item(
        &self,
        item_id: ActionItemId,
        completed_on: NaiveDate,
    ) -> AppResult<ActionItem> {
        let mut item = self
            .action_items
            .find_action_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("action item '{item_id}' does not exist")))?;

        item.complete(completed_on);
        self.action_items.update_action_item(item).await
    }

    /// Records the head count of an audit, replacing any previous count.
    pub async fn save_site_personnel(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel> {
        counts.validate()?;
        self.require_audit(audit_id).await?;
        self.site_personnel
            .save_site_personnel(audit_id, counts)
            .await
    }

    /// Records a visual observation; the store stamps the time.
    pub async fn record_observation(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation> {
        observation.validate()?;
        self.require_audit(observation.audit_id).await?;
        self.observations.record_observation(observation).await
    }

    async fn require_audit(&self, audit_id: AuditId) -> AppResult<()> {
        if self.audits.find_audit(audit_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "audit '{audit_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

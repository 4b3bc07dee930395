use async_trait::async_trait;
use chrono::Utc;
use ohs_audit_application::{
    ActionItemRepository, RiskRatingRepository, SitePersonnelRepository,
    VisualObservationRepository,
};
use ohs_audit_domain::{
    NewActionItem, NewRiskRating, NewVisualObservation, RiskLevel, SitePersonnelCounts,
};

use super::*;

#[async_trait]
impl RiskRatingRepository for InMemoryStore {
    async fn create_risk_rating(&self, rating: NewRiskRating) -> AppResult<RiskRating> {
        let mut tables = self.tables.write().await;
        if tables
            .risk_ratings
            .values()
            .any(|stored| stored.level == rating.level)
        {
            return Err(AppError::Conflict(format!(
                "risk level '{}' already has a rating",
                rating.level.as_str()
            )));
        }

        let rating = RiskRating {
            id: RiskRatingId::new(tables.next_id()),
            level: rating.level,
            time_frame: rating.time_frame.trim().to_owned(),
        };
        tables.risk_ratings.insert(rating.id, rating.clone());
        Ok(rating)
    }

    async fn find_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<Option<RiskRating>> {
        Ok(self.tables.read().await.risk_ratings.get(&rating_id).cloned())
    }

    async fn find_risk_rating_by_level(&self, level: RiskLevel) -> AppResult<Option<RiskRating>> {
        let tables = self.tables.read().await;
        Ok(tables
            .risk_ratings
            .values()
            .find(|rating| rating.level == level)
            .cloned())
    }

    async fn list_risk_ratings(&self) -> AppResult<Vec<RiskRating>> {
        let tables = self.tables.read().await;
        let mut ratings: Vec<RiskRating> = tables.risk_ratings.values().cloned().collect();
        ratings.sort_by_key(|rating| rating.level);
        Ok(ratings)
    }

    async fn update_risk_rating(&self, rating: RiskRating) -> AppResult<RiskRating> {
        let mut tables = self.tables.write().await;
        if tables
            .risk_ratings
            .values()
            .any(|stored| stored.level == rating.level && stored.id != rating.id)
        {
            return Err(AppError::Conflict(format!(
                "risk level '{}' already has a rating",
                rating.level.as_str()
            )));
        }

        let stored = tables
            .risk_ratings
            .get_mut(&rating.id)
            .ok_or_else(|| missing("risk rating", rating.id))?;
        *stored = rating.clone();
        Ok(rating)
    }

    async fn delete_risk_rating(&self, rating_id: RiskRatingId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.risk_ratings.remove(&rating_id).is_none() {
            return Err(missing("risk rating", rating_id));
        }

        for item in tables.action_items.values_mut() {
            if item.risk_rating_id == Some(rating_id) {
                item.risk_rating_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActionItemRepository for InMemoryStore {
    async fn create_action_item(&self, item: NewActionItem) -> AppResult<ActionItem> {
        let mut tables = self.tables.write().await;
        tables.require_audit_reference(item.audit_id)?;
        if let Some(rating_id) = item.risk_rating_id
            && !tables.risk_ratings.contains_key(&rating_id)
        {
            return Err(AppError::field("risk_rating", INVALID_REFERENCE));
        }

        let item = item.into_action_item(ActionItemId::new(tables.next_id()));
        tables.action_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_action_item(&self, item_id: ActionItemId) -> AppResult<Option<ActionItem>> {
        Ok(self.tables.read().await.action_items.get(&item_id).cloned())
    }

    async fn list_action_items(&self, audit_id: AuditId) -> AppResult<Vec<ActionItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .action_items
            .values()
            .filter(|item| item.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn update_action_item(&self, item: ActionItem) -> AppResult<ActionItem> {
        let mut tables = self.tables.write().await;
        if let Some(rating_id) = item.risk_rating_id
            && !tables.risk_ratings.contains_key(&rating_id)
        {
            return Err(AppError::field("risk_rating", INVALID_REFERENCE));
        }

        let stored = tables
            .action_items
            .get_mut(&item.id)
            .ok_or_else(|| missing("action item", item.id))?;
        *stored = item.clone();
        Ok(item)
    }

    async fn delete_action_item(&self, item_id: ActionItemId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .action_items
            .remove(&item_id)
            .map(|_| ())
            .ok_or_else(|| missing("action item", item_id))
    }
}

#[async_trait]
impl SitePersonnelRepository for InMemoryStore {
    async fn save_site_personnel(
        &self,
        audit_id: AuditId,
        counts: SitePersonnelCounts,
    ) -> AppResult<SitePersonnel> {
        let mut tables = self.tables.write().await;
        tables.require_audit_reference(audit_id)?;

        let existing = tables
            .site_personnel
            .values()
            .find(|personnel| personnel.audit_id == audit_id)
            .map(|personnel| personnel.id);
        let id = match existing {
            Some(id) => id,
            None => SitePersonnelId::new(tables.next_id()),
        };

        let personnel = counts.into_personnel(id, audit_id);
        tables.site_personnel.insert(id, personnel.clone());
        Ok(personnel)
    }

    async fn find_site_personnel(&self, audit_id: AuditId) -> AppResult<Option<SitePersonnel>> {
        let tables = self.tables.read().await;
        Ok(tables
            .site_personnel
            .values()
            .find(|personnel| personnel.audit_id == audit_id)
            .cloned())
    }

    async fn delete_site_personnel(&self, audit_id: AuditId) -> AppResult<()> {
        self.tables
            .write()
            .await
            .site_personnel
            .retain(|_, personnel| personnel.audit_id != audit_id);
        Ok(())
    }
}

#[async_trait]
impl VisualObservationRepository for InMemoryStore {
    async fn record_observation(
        &self,
        observation: NewVisualObservation,
    ) -> AppResult<VisualObservation> {
        let mut tables = self.tables.write().await;
        tables.require_audit_reference(observation.audit_id)?;

        let observation =
            observation.into_observation(VisualObservationId::new(tables.next_id()), Utc::now());
        tables
            .visual_observations
            .insert(observation.id, observation.clone());
        Ok(observation)
    }

    async fn list_observations(&self, audit_id: AuditId) -> AppResult<Vec<VisualObservation>> {
        let tables = self.tables.read().await;
        let mut observations: Vec<VisualObservation> = tables
            .visual_observations
            .values()
            .filter(|observation| observation.audit_id == audit_id)
            .cloned()
            .collect();
        observations.sort_by(|left, right| {
            left.date_recorded
                .cmp(&right.date_recorded)
                .then(left.id.cmp(&right.id))
        });
        Ok(observations)
    }

    async fn update_observation(
        &self,
        observation: VisualObservation,
    ) -> AppResult<VisualObservation> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .visual_observations
            .get_mut(&observation.id)
            .ok_or_else(|| missing("visual observation", observation.id))?;

        stored.description = observation.description;
        stored.observation_type = observation.observation_type;
        stored.photo_reference = observation.photo_reference;
        Ok(stored.clone())
    }

    async fn delete_observation(&self, observation_id: VisualObservationId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .visual_observations
            .remove(&observation_id)
            .map(|_| ())
            .ok_or_else(|| missing("visual observation", observation_id))
    }
}

use super::*;

impl AuditService {
    /// Loads the full report of one audit.
    pub async fn audit_detail(&self, audit_id: AuditId) -> AppResult<AuditDetail> {
        let audit = self.audit(audit_id).await?;
        let repositories = &self.repositories;

        let project = repositories
            .projects
            .find_project(audit.project_id)
            .await?
            .ok_or_else(|| missing_parent("project", audit_id))?;
        let client = repositories
            .clients
            .find_client(project.client_id)
            .await?
            .ok_or_else(|| missing_parent("client", audit_id))?;
        let consulting_engineer = repositories
            .consulting_firms
            .find_consulting_firm(project.consulting_engineer_id)
            .await?
            .ok_or_else(|| missing_parent("consulting engineer", audit_id))?;
        let principal_contractor = repositories
            .principal_contractors
            .find_principal_contractor(project.principal_contractor_id)
            .await?
            .ok_or_else(|| missing_parent("principal contractor", audit_id))?;

        let checklist = ChecklistSection::group(
            repositories.checklist.list_checklist_items(audit_id).await?,
        );

        let ratings = repositories.risk_ratings.list_risk_ratings().await?;
        let action_items = repositories
            .action_items
            .list_action_items(audit_id)
            .await?
            .into_iter()
            .map(|item| {
                let risk_rating = item
                    .risk_rating_id
                    .and_then(|rating_id| ratings.iter().find(|rating| rating.id == rating_id))
                    .cloned();
                ActionItemDetail { item, risk_rating }
            })
            .collect();

        let site_personnel = repositories
            .site_personnel
            .find_site_personnel(audit_id)
            .await?;
        let visual_observations = repositories.observations.list_observations(audit_id).await?;

        Ok(AuditDetail {
            audit,
            project,
            client,
            consulting_engineer,
            principal_contractor,
            checklist,
            action_items,
            site_personnel,
            visual_observations,
        })
    }
}

fn missing_parent(kind: &str, audit_id: AuditId) -> AppError {
    AppError::Internal(format!("{kind} of audit '{audit_id}' is missing"))
}

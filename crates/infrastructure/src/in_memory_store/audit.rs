use async_trait::async_trait;
use ohs_audit_application::AuditRepository;
use ohs_audit_domain::{AuditSummary, NewAudit};

use super::*;

#[async_trait]
impl AuditRepository for InMemoryStore {
    async fn create_audit(&self, audit: NewAudit) -> AppResult<Audit> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&audit.project_id) {
            return Err(AppError::field("project", INVALID_REFERENCE));
        }

        let audit = audit.into_audit(AuditId::new(tables.next_id()));
        tables.audits.insert(audit.id, audit.clone());
        Ok(audit)
    }

    async fn find_audit(&self, audit_id: AuditId) -> AppResult<Option<Audit>> {
        Ok(self.tables.read().await.audits.get(&audit_id).cloned())
    }

    async fn find_audit_by_report_number(
        &self,
        report_number: &str,
    ) -> AppResult<Option<Audit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .audits
            .values()
            .rev()
            .find(|audit| audit.report_number == report_number)
            .cloned())
    }

    async fn count_audits(&self) -> AppResult<u64> {
        let count = self.tables.read().await.audits.len();
        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("audit count overflow: {error}")))
    }

    async fn list_audit_summaries(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<AuditSummary>> {
        let tables = self.tables.read().await;
        let mut audits: Vec<&Audit> = tables.audits.values().collect();
        audits.sort_by(|left, right| {
            right
                .audit_date
                .cmp(&left.audit_date)
                .then(right.id.cmp(&left.id))
        });

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        audits
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|audit| {
                let project = tables
                    .projects
                    .get(&audit.project_id)
                    .ok_or_else(|| missing("project", audit.project_id))?;
                let client = tables
                    .clients
                    .get(&project.client_id)
                    .ok_or_else(|| missing("client", project.client_id))?;

                Ok(AuditSummary {
                    id: audit.id,
                    audit_date: audit.audit_date,
                    audit_type: audit.audit_type,
                    audit_number: audit.audit_number.clone(),
                    report_number: audit.report_number.clone(),
                    performed_by: audit.performed_by.clone(),
                    overall_score_percentage: audit.overall_score_percentage,
                    project_id: project.id,
                    project_title: project.title.clone(),
                    client_name: client.name.clone(),
                })
            })
            .collect()
    }

    async fn update_audit(&self, audit: Audit) -> AppResult<Audit> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&audit.project_id) {
            return Err(AppError::field("project", INVALID_REFERENCE));
        }

        let stored = tables
            .audits
            .get_mut(&audit.id)
            .ok_or_else(|| missing("audit", audit.id))?;
        *stored = audit.clone();
        Ok(audit)
    }

    async fn delete_audit(&self, audit_id: AuditId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.audits.contains_key(&audit_id) {
            return Err(missing("audit", audit_id));
        }
        tables.delete_audit_cascade(audit_id);
        Ok(())
    }
}

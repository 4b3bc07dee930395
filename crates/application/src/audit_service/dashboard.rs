use ohs_audit_domain::{AuditSummary, DASHBOARD_PAGE_SIZE, Page, PageWindow};

use super::*;

impl AuditService {
    /// Returns one dashboard page, newest audits first.
    ///
    /// `requested_page` is the raw `page` query value; invalid or out of
    /// range values are clamped rather than rejected.
    pub async fn dashboard(&self, requested_page: Option<&str>) -> AppResult<Page<AuditSummary>> {
        let count = self.repositories.audits.count_audits().await?;
        let window = PageWindow::resolve(requested_page, count, DASHBOARD_PAGE_SIZE);
        let items = self
            .repositories
            .audits
            .list_audit_summaries(window.limit(), window.offset())
            .await?;

        Ok(Page { items, window })
    }
}

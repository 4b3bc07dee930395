use async_trait::async_trait;

use ohs_audit_core::AppResult;
use ohs_audit_domain::{Audit, AuditId, AuditSummary, NewAudit};

/// Repository port for audits.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Stores a new audit. Fails on field `project` when the project is gone.
    async fn create_audit(&self, audit: NewAudit) -> AppResult<Audit>;

    /// Returns one audit by key.
    async fn find_audit(&self, audit_id: AuditId) -> AppResult<Option<Audit>>;

    /// Returns the newest audit carrying this report number.
    async fn find_audit_by_report_number(&self, report_number: &str)
    -> AppResult<Option<Audit>>;

    /// Counts every stored audit.
    async fn count_audits(&self) -> AppResult<u64>;

    /// Lists dashboard rows, newest audit date first, ties by key descending.
    async fn list_audit_summaries(&self, limit: u64, offset: u64)
    -> AppResult<Vec<AuditSummary>>;

    /// Overwrites a stored audit. Fails with `NotFound` when it is gone.
    async fn update_audit(&self, audit: Audit) -> AppResult<Audit>;

    /// Deletes an audit together with every dependent record.
    async fn delete_audit(&self, audit_id: AuditId) -> AppResult<()>;
}

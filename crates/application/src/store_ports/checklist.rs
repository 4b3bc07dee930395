use async_trait::async_trait;

use ohs_audit_core::AppResult;
use ohs_audit_domain::{AuditId, ChecklistItem, ChecklistItemId, NewChecklistItem};

/// Repository port for checklist rows of every section.
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Stores a new row.
    ///
    /// A second row for the same audit, section, and item fails with
    /// `Conflict` and leaves the first row untouched.
    async fn add_checklist_item(&self, item: NewChecklistItem) -> AppResult<ChecklistItem>;

    /// Returns one row by key.
    async fn find_checklist_item(
        &self,
        item_id: ChecklistItemId,
    ) -> AppResult<Option<ChecklistItem>>;

    /// Lists the rows of one audit in insertion order.
    async fn list_checklist_items(&self, audit_id: AuditId) -> AppResult<Vec<ChecklistItem>>;

    /// Overwrites a stored row, keeping the uniqueness rule.
    async fn update_checklist_item(&self, item: ChecklistItem) -> AppResult<ChecklistItem>;

    /// Deletes one row.
    async fn delete_checklist_item(&self, item_id: ChecklistItemId) -> AppResult<()>;
}

use async_trait::async_trait;
use ohs_audit_application::ChecklistRepository;
use ohs_audit_domain::{ChecklistCategory, NewChecklistItem};

use super::*;

impl Tables {
    fn checklist_key_taken(
        &self,
        audit_id: AuditId,
        category: ChecklistCategory,
        item_type: &str,
        except: Option<ChecklistItemId>,
    ) -> bool {
        self.checklist_items.values().any(|item| {
            Some(item.id) != except
                && item.audit_id == audit_id
                && item.category == category
                && item.item_type == item_type
        })
    }
}

fn duplicate_item(audit_id: AuditId, category: ChecklistCategory, item_type: &str) -> AppError {
    AppError::Conflict(format!(
        "audit '{audit_id}' already has a {} row for '{item_type}'",
        category.as_str()
    ))
}

#[async_trait]
impl ChecklistRepository for InMemoryStore {
    async fn add_checklist_item(&self, item: NewChecklistItem) -> AppResult<ChecklistItem> {
        let mut tables = self.tables.write().await;
        tables.require_audit_reference(item.audit_id)?;
        if tables.checklist_key_taken(item.audit_id, item.category, &item.item_type, None) {
            return Err(duplicate_item(item.audit_id, item.category, &item.item_type));
        }

        let item = item.into_item(ChecklistItemId::new(tables.next_id()));
        tables.checklist_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_checklist_item(
        &self,
        item_id: ChecklistItemId,
    ) -> AppResult<Option<ChecklistItem>> {
        Ok(self
            .tables
            .read()
            .await
            .checklist_items
            .get(&item_id)
            .cloned())
    }

    async fn list_checklist_items(&self, audit_id: AuditId) -> AppResult<Vec<ChecklistItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .checklist_items
            .values()
            .filter(|item| item.audit_id == audit_id)
            .cloned()
            .collect())
    }

    async fn update_checklist_item(&self, item: ChecklistItem) -> AppResult<ChecklistItem> {
        let mut tables = self.tables.write().await;
        if !tables.checklist_items.contains_key(&item.id) {
            return Err(missing("checklist item", item.id));
        }
        tables.require_audit_reference(item.audit_id)?;
        if tables.checklist_key_taken(item.audit_id, item.category, &item.item_type, Some(item.id))
        {
            return Err(duplicate_item(item.audit_id, item.category, &item.item_type));
        }

        tables.checklist_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete_checklist_item(&self, item_id: ChecklistItemId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .checklist_items
            .remove(&item_id)
            .map(|_| ())
            .ok_or_else(|| missing("checklist item", item_id))
    }
}

use std::sync::Arc;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{ClientContactUpdate, ClientId, FieldInput, NewClient};

use crate::fakes::FakeStore;

use super::OrganizationService;

fn build_service(store: &Arc<FakeStore>) -> OrganizationService {
    OrganizationService::new(store.clone(), store.clone(), store.clone(), store.clone())
}

#[tokio::test]
async fn contact_update_never_renames_client() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);
    let client = service.create_client(NewClient::named("City of Tshwane")).await?;

    let input = FieldInput::new()
        .with("name", "Renamed Municipality")
        .with("contact_name", "Thandi Mokoena");
    let update = ClientContactUpdate::from_input(&input)?;
    let updated = service.update_client_contact(client.id, update).await?;

    assert_eq!(updated.name, "City of Tshwane");
    assert_eq!(updated.contact_name.as_deref(), Some("Thandi Mokoena"));
    assert_eq!(service.client(client.id).await?.name, "City of Tshwane");
    Ok(())
}

#[tokio::test]
async fn missing_client_is_not_found() {
    let store = FakeStore::shared();
    let service = build_service(&store);

    let result = service
        .update_client_contact(ClientId::new(404), ClientContactUpdate::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn ensure_client_reuses_existing_row() -> AppResult<()> {
    let store = FakeStore::shared();
    let service = build_service(&store);

    let first = service.ensure_client(NewClient::named("Gauteng Roads")).await?;
    let second = service.ensure_client(NewClient::named(" Gauteng Roads ")).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(service.list_clients().await?.len(), 1);
    Ok(())
}

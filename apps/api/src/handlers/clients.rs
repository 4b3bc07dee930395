use axum::Json;
use axum::extract::State;
use ohs_audit_domain::{ClientContactUpdate, ClientId};

use crate::dto::{ClientListResponse, ClientResponse, SuccessResponse};
use crate::error::ApiResult;
use crate::extract::{CanonicalInput, RecordId};
use crate::state::AppState;

/// GET /clients/ - Every client ordered by name.
pub async fn list_clients_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ClientListResponse>> {
    let clients = state
        .organization_service
        .list_clients()
        .await?
        .into_iter()
        .map(ClientResponse::from)
        .collect();

    Ok(Json(ClientListResponse { clients }))
}

pub async fn client_detail_handler(
    State(state): State<AppState>,
    RecordId(client_id): RecordId,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .organization_service
        .client(ClientId::new(client_id))
        .await?;

    Ok(Json(client.into()))
}

/// POST /clients/{id}/update/ - Change contact details.
///
/// Only the contact fields are read from the body; any other key is ignored.
pub async fn update_client_handler(
    State(state): State<AppState>,
    RecordId(client_id): RecordId,
    input: CanonicalInput,
) -> ApiResult<Json<SuccessResponse>> {
    let client_id = ClientId::new(client_id);
    state.organization_service.client(client_id).await?;

    let update = ClientContactUpdate::from_input(&input.fields)?;
    state
        .organization_service
        .update_client_contact(client_id, update)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

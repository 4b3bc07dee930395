use axum::Json;
use axum::extract::{Query, State};
use ohs_audit_application::{AuditFormMetadata, ShareRequest};
use ohs_audit_domain::AuditId;
use serde::Deserialize;

use crate::dto::{AuditDetailResponse, CreateAuditResponse, DashboardResponse, SuccessResponse};
use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonInput, RecordId};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    page: Option<String>,
}

/// GET /reports/ - Paginated audit dashboard.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let page = state
        .audit_service
        .dashboard(query.page.as_deref())
        .await?;

    Ok(Json(page.into()))
}

pub async fn create_audit_metadata_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<AuditFormMetadata>> {
    Ok(Json(state.audit_service.form_metadata().await?))
}

/// POST /reports/create/ - Validate and store one audit.
pub async fn create_audit_handler(
    State(state): State<AppState>,
    JsonInput(input): JsonInput,
) -> ApiResult<Json<CreateAuditResponse>> {
    let audit = state.audit_service.create_audit(&input).await?;

    Ok(Json(CreateAuditResponse {
        success: true,
        id: audit.id.as_i64(),
    }))
}

pub async fn audit_detail_handler(
    State(state): State<AppState>,
    RecordId(audit_id): RecordId,
) -> ApiResult<Json<AuditDetailResponse>> {
    let detail = state
        .audit_service
        .audit_detail(AuditId::new(audit_id))
        .await?;
    let today = chrono::Utc::now().date_naive();

    Ok(Json(AuditDetailResponse::from_detail(detail, today)))
}

/// POST /reports/{id}/share/ - Email a link to the report.
///
/// An unknown audit is reported before the body is looked at.
pub async fn share_audit_handler(
    State(state): State<AppState>,
    RecordId(audit_id): RecordId,
    body: Result<JsonInput, ApiError>,
) -> ApiResult<Json<SuccessResponse>> {
    let audit_id = AuditId::new(audit_id);
    state.audit_service.audit(audit_id).await?;
    let JsonInput(input) = body?;

    state
        .share_service
        .share_audit(
            audit_id,
            ShareRequest {
                to_email: input.raw("to_email").map(ToOwned::to_owned),
                message: input.raw("message").unwrap_or_default().to_owned(),
            },
        )
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

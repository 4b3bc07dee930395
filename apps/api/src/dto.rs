mod auth;
mod clients;
mod common;
mod reports;

pub use auth::{AuthResponse, IndexResponse};
pub use clients::{ClientListResponse, ClientResponse};
pub use common::{HealthResponse, MethodNotAllowedResponse, SuccessResponse};
pub use reports::{AuditDetailResponse, CreateAuditResponse, DashboardResponse};

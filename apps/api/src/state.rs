use ohs_audit_application::{
    AuditService, AuthService, FollowUpService, OrganizationService, ShareService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub organization_service: OrganizationService,
    pub audit_service: AuditService,
    pub follow_up_service: FollowUpService,
    pub share_service: ShareService,
    /// Scheme, host, and port that mutating requests must originate from.
    pub allowed_origin: String,
}

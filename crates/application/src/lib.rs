//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_service;
mod auth_service;
mod follow_up_service;
mod notification_ports;
mod organization_service;
mod share_service;
mod store_ports;

#[cfg(test)]
mod fakes;

pub use audit_service::{
    ActionItemDetail, AuditDetail, AuditFormMetadata, AuditRepositories, AuditService,
    FieldChoice, FormFieldMetadata,
};
pub use auth_service::{
    AuthService, INACTIVE_ACCOUNT_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LoginOutcome,
    MISSING_PASSWORD_MESSAGE, MISSING_USERNAME_MESSAGE, PasswordHasher,
};
pub use follow_up_service::FollowUpService;
pub use notification_ports::{EmailMessage, EmailService};
pub use organization_service::OrganizationService;
pub use share_service::{RECIPIENT_REQUIRED_MESSAGE, ShareRequest, ShareService};
pub use store_ports::{
    ActionItemRepository, AuditRepository, ChecklistRepository, ClientRepository,
    ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
    RiskRatingRepository, SitePersonnelRepository, UserRepository, VisualObservationRepository,
};

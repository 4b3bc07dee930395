//! Domain records, identifiers, and field validation for OHS audits.

#![forbid(unsafe_code)]

mod audit;
mod checklist;
mod email;
mod follow_up;
mod ids;
/// Canonical request input and shared validation messages.
pub mod input;
mod organization;
mod pagination;
mod project;
mod site;
mod user;

pub use audit::{
    AUDIT_FIELDS, AUDIT_NUMBER_MAX_CHARS, Audit, AuditSummary, AuditType, NOTICE_FIELDS,
    NewAudit, PERFORMED_BY_MAX_CHARS, Percentage, REPORT_NUMBER_MAX_CHARS, SCORE_FIELDS,
};
pub use checklist::{
    APPOINTED_PERSON_MAX_CHARS, ChecklistCategory, ChecklistItem, ChecklistSection,
    ComplianceScore, ItemCode, NewChecklistItem,
};
pub use email::EmailAddress;
pub use follow_up::{
    ASSIGNED_TO_MAX_CHARS, ActionItem, NewActionItem, NewRiskRating,
    REGULATION_REFERENCE_MAX_CHARS, RiskLevel, RiskRating, TIME_FRAME_MAX_CHARS,
};
pub use ids::{
    ActionItemId, AuditId, ChecklistItemId, ClientId, ConsultingFirmId, PrincipalContractorId,
    ProjectId, RiskRatingId, SitePersonnelId, UserId, VisualObservationId,
};
pub use input::FieldInput;
pub use organization::{
    CLIENT_CONTACT_FIELDS, Client, ClientContactUpdate, ConsultingFirm, NAME_MAX_CHARS,
    NewClient, NewConsultingFirm, NewPrincipalContractor, PHONE_MAX_CHARS, PrincipalContractor,
    REGISTRATION_NUMBER_MAX_CHARS,
};
pub use pagination::{DASHBOARD_PAGE_SIZE, Page, PageWindow};
pub use project::{NewProject, PERMIT_NUMBER_MAX_CHARS, Project, TITLE_MAX_CHARS};
pub use site::{
    NewVisualObservation, OBSERVATION_TYPE_MAX_CHARS, PHOTO_REFERENCE_MAX_CHARS, SitePersonnel,
    SitePersonnelCounts, VisualObservation,
};
pub use user::{NewUserAccount, USERNAME_MAX_CHARS, UserAccount, validate_username};

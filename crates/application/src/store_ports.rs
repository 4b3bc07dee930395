//! Entity Store ports: one repository trait per entity kind.
//!
//! Adapters must make each call atomic, so reference checks, uniqueness checks,
//! and cascades never observe a half-applied write. A duplicate key is reported
//! as `AppError::Conflict`; a reference to a missing row as a field-scoped
//! `AppError::Validation`.

mod account;
mod audit;
mod checklist;
mod follow_up;
mod organization;

pub use account::UserRepository;
pub use audit::AuditRepository;
pub use checklist::ChecklistRepository;
pub use follow_up::{
    ActionItemRepository, RiskRatingRepository, SitePersonnelRepository,
    VisualObservationRepository,
};
pub use organization::{
    ClientRepository, ConsultingFirmRepository, PrincipalContractorRepository, ProjectRepository,
};

//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod console_email_service;
mod in_memory_email_outbox;
mod in_memory_store;
mod postgres_audit_repository;
mod postgres_checklist_repository;
mod postgres_errors;
mod postgres_follow_up_repository;
mod postgres_organization_repository;
mod postgres_user_repository;
mod smtp_email_service;

#[cfg(test)]
mod postgres_test_support;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use console_email_service::ConsoleEmailService;
pub use in_memory_email_outbox::InMemoryEmailOutbox;
pub use in_memory_store::InMemoryStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_checklist_repository::PostgresChecklistRepository;
pub use postgres_follow_up_repository::PostgresFollowUpRepository;
pub use postgres_organization_repository::PostgresOrganizationRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService, SmtpTlsMode};

use async_trait::async_trait;

use ohs_audit_core::AppResult;

/// Plain-text email ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address, already validated.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
}

/// Port for sending emails. Infrastructure provides SMTP, console, and
/// in-memory implementations.
///
/// Transport failures are reported as `AppError::Delivery` carrying the
/// transport's error text.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one message.
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;
}

//! Development email adapter that writes messages to the log.

use async_trait::async_trait;
use ohs_audit_application::{EmailMessage, EmailService};
use ohs_audit_core::AppResult;
use tracing::info;

/// Email service that logs each message instead of delivering it.
#[derive(Clone, Default)]
pub struct ConsoleEmailService {
    from_address: String,
}

impl ConsoleEmailService {
    /// Creates a console email service reporting the given sender.
    #[must_use]
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %message.to,
            subject = %message.subject,
            "--- EMAIL (console) ---\n{}\n--- END EMAIL ---",
            message.text_body
        );

        Ok(())
    }
}

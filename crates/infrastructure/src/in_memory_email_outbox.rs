//! Email adapter that keeps messages in memory.

use async_trait::async_trait;
use ohs_audit_application::{EmailMessage, EmailService};
use ohs_audit_core::{AppError, AppResult};
use tokio::sync::RwLock;

/// Outbox that records every sent message. Can be switched to fail.
#[derive(Debug, Default)]
pub struct InMemoryEmailOutbox {
    sent: RwLock<Vec<EmailMessage>>,
    failure: RwLock<Option<String>>,
}

impl InMemoryEmailOutbox {
    /// Creates an empty outbox that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following send fail with the given transport error.
    pub async fn fail_with(&self, error: impl Into<String>) {
        *self.failure.write().await = Some(error.into());
    }

    /// Returns the messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailService for InMemoryEmailOutbox {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        if let Some(error) = self.failure.read().await.clone() {
            return Err(AppError::Delivery(error));
        }

        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ohs_audit_application::{EmailMessage, EmailService};
    use ohs_audit_core::AppError;

    use super::InMemoryEmailOutbox;

    fn message() -> EmailMessage {
        EmailMessage {
            to: "inspector@example.org".to_owned(),
            subject: "Audit Report: CHS-LSC-2025/06".to_owned(),
            text_body: "See attached.".to_owned(),
        }
    }

    #[tokio::test]
    async fn records_sent_messages() {
        let outbox = InMemoryEmailOutbox::new();
        assert!(outbox.send(&message()).await.is_ok());
        assert_eq!(outbox.sent().await, vec![message()]);
    }

    #[tokio::test]
    async fn failing_outbox_records_nothing() {
        let outbox = InMemoryEmailOutbox::new();
        outbox.fail_with("connection refused").await;

        let result = outbox.send(&message()).await;
        assert!(matches!(result, Err(AppError::Delivery(text)) if text == "connection refused"));
        assert!(outbox.sent().await.is_empty());
    }
}

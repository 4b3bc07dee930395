//! Sharing an audit report by email.

use std::sync::Arc;
use std::time::Duration;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_domain::{AuditId, EmailAddress, input::INVALID_EMAIL};
use tracing::{error, info};

use crate::{AuditRepository, EmailMessage, EmailService};

/// Message for a share request without a recipient.
pub const RECIPIENT_REQUIRED_MESSAGE: &str = "Recipient email required.";

/// Request to share one audit report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareRequest {
    /// Recipient address as submitted.
    pub to_email: Option<String>,
    /// Free-text message placed above the report link.
    pub message: String,
}

/// Application service that emails report links.
#[derive(Clone)]
pub struct ShareService {
    audits: Arc<dyn AuditRepository>,
    email_service: Arc<dyn EmailService>,
    public_base_url: String,
    send_timeout: Duration,
}

impl ShareService {
    /// Creates a new share service.
    ///
    /// `public_base_url` is the externally reachable origin used to build
    /// report links; a trailing slash is ignored.
    #[must_use]
    pub fn new(
        audits: Arc<dyn AuditRepository>,
        email_service: Arc<dyn EmailService>,
        public_base_url: impl Into<String>,
        send_timeout: Duration,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_owned();
        Self {
            audits,
            email_service,
            public_base_url,
            send_timeout,
        }
    }

    /// Absolute link to an audit report.
    #[must_use]
    pub fn report_url(&self, audit_id: AuditId) -> String {
        format!("{}/reports/{audit_id}/", self.public_base_url)
    }

    /// Emails a link to an audit report.
    ///
    /// The audit must exist before the recipient is checked. Nothing is sent
    /// when the recipient is missing or malformed. A transport failure or a
    /// dispatch slower than the configured timeout is a `Delivery` error.
    pub async fn share_audit(
        &self,
        audit_id: AuditId,
        request: ShareRequest,
    ) -> AppResult<EmailMessage> {
        let audit = self
            .audits
            .find_audit(audit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("audit '{audit_id}' does not exist")))?;

        let to_email = request
            .to_email
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::field("to_email", RECIPIENT_REQUIRED_MESSAGE))?;
        let recipient =
            EmailAddress::new(to_email).map_err(|_| AppError::field("to_email", INVALID_EMAIL))?;

        let message = EmailMessage {
            to: recipient.into(),
            subject: format!("Audit Report: {}", audit.report_number),
            text_body: format!(
                "{}\n\nView the report: {}",
                request.message,
                self.report_url(audit.id)
            ),
        };

        match tokio::time::timeout(self.send_timeout, self.email_service.send(&message)).await {
            Ok(Ok(())) => {
                info!(audit_id = %audit.id, "audit report shared");
                Ok(message)
            }
            Ok(Err(failure)) => {
                error!(audit_id = %audit.id, error = %failure, "audit report share failed");
                Err(match failure {
                    AppError::Delivery(text) => AppError::Delivery(text),
                    other => AppError::Delivery(other.to_string()),
                })
            }
            Err(_) => {
                error!(audit_id = %audit.id, "audit report share timed out");
                Err(AppError::Delivery(format!(
                    "timed out after {} seconds",
                    self.send_timeout.as_secs()
                )))
            }
        }
    }
}

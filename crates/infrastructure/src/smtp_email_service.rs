//! SMTP email adapter built on `lettre`.

use std::str::FromStr;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use ohs_audit_application::{EmailMessage, EmailService};
use ohs_audit_core::{AppError, AppResult};

/// Transport security of the SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpTlsMode {
    /// Plain connection upgraded with STARTTLS.
    #[default]
    StartTls,
    /// TLS from the first byte (SMTPS).
    Tls,
    /// Unencrypted connection, for local relays only.
    None,
}

impl FromStr for SmtpTlsMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" => Ok(Self::Tls),
            "none" => Ok(Self::None),
            other => Err(AppError::Configuration(format!(
                "SMTP_TLS must be one of 'starttls', 'tls' or 'none', got '{other}'"
            ))),
        }
    }
}

/// SMTP email service configuration.
#[derive(Clone)]
pub struct SmtpEmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// Username and password, when the relay requires authentication.
    pub credentials: Option<(String, String)>,
    /// Connection security.
    pub tls: SmtpTlsMode,
    /// Sender address placed in the `From` header.
    pub from_address: String,
}

/// Email service delivering through one SMTP relay.
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailService {
    /// Builds the transport once; connections are opened per message.
    pub fn new(config: SmtpEmailConfig) -> AppResult<Self> {
        let from = config.from_address.parse::<Mailbox>().map_err(|error| {
            AppError::Configuration(format!(
                "invalid sender address '{}': {error}",
                config.from_address
            ))
        })?;

        let builder = match config.tls {
            SmtpTlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
            SmtpTlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpTlsMode::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.host,
            )),
        }
        .map_err(|error| {
            AppError::Configuration(format!("failed to create SMTP transport: {error}"))
        })?
        .port(config.port);

        let builder = match config.credentials {
            Some((username, password)) => builder.credentials(Credentials::new(username, password)),
            None => builder,
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|error| AppError::Delivery(format!("invalid recipient address: {error}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.text_body.clone())
            .map_err(|error| AppError::Delivery(format!("failed to build email: {error}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|error| AppError::Delivery(error.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ohs_audit_core::AppError;

    use super::{SmtpEmailConfig, SmtpEmailService, SmtpTlsMode};

    fn config(from_address: &str) -> SmtpEmailConfig {
        SmtpEmailConfig {
            host: "smtp.example.org".to_owned(),
            port: 587,
            credentials: None,
            tls: SmtpTlsMode::StartTls,
            from_address: from_address.to_owned(),
        }
    }

    #[test]
    fn tls_mode_parses_known_values() {
        assert_eq!("STARTTLS".parse::<SmtpTlsMode>().ok(), Some(SmtpTlsMode::StartTls));
        assert_eq!("tls".parse::<SmtpTlsMode>().ok(), Some(SmtpTlsMode::Tls));
        assert_eq!(" none ".parse::<SmtpTlsMode>().ok(), Some(SmtpTlsMode::None));
        assert!(matches!(
            "ssl".parse::<SmtpTlsMode>(),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn invalid_sender_fails_at_startup() {
        let result = SmtpEmailService::new(config("not an address"));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn plain_relay_builds_without_credentials() {
        let mut config = config("OHS Audits <no-reply@example.org>");
        config.tls = SmtpTlsMode::None;
        config.port = 25;
        assert!(SmtpEmailService::new(config).is_ok());
    }
}

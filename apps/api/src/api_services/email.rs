use std::sync::Arc;

use ohs_audit_application::EmailService;
use ohs_audit_core::AppError;
use ohs_audit_infrastructure::{ConsoleEmailService, SmtpEmailConfig, SmtpEmailService};

use crate::api_config::{ApiConfig, EmailProviderConfig};

pub fn build_email_service(config: &ApiConfig) -> Result<Arc<dyn EmailService>, AppError> {
    let service: Arc<dyn EmailService> = match &config.email_provider {
        EmailProviderConfig::Console => {
            Arc::new(ConsoleEmailService::new(config.default_from_email.clone()))
        }
        EmailProviderConfig::Smtp(smtp) => {
            let credentials = match (&smtp.username, &smtp.password) {
                (Some(username), Some(password)) => Some((username.clone(), password.clone())),
                (None, None) => None,
                _ => {
                    return Err(AppError::Configuration(
                        "SMTP_USERNAME and SMTP_PASSWORD must be set together".to_owned(),
                    ));
                }
            };

            Arc::new(SmtpEmailService::new(SmtpEmailConfig {
                host: smtp.host.clone(),
                port: smtp.port,
                credentials,
                tls: smtp.tls,
                from_address: config.default_from_email.clone(),
            })?)
        }
    };

    Ok(service)
}

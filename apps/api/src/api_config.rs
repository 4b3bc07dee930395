use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use ohs_audit_core::{AppError, AppResult};
use ohs_audit_infrastructure::SmtpTlsMode;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_FROM_EMAIL: &str = "no-reply@localhost";

/// SMTP relay settings read from the environment.
#[derive(Clone)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: SmtpTlsMode,
}

/// Selected outgoing mail transport.
#[derive(Clone)]
pub enum EmailProviderConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    Migrate,
    CreateUser { username: String },
    SetUserActive { username: String, is_active: bool },
    SeedSample,
}

impl Command {
    /// Parses the arguments following the binary name.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> AppResult<Self> {
        let Some(name) = args.next() else {
            return Ok(Self::Serve);
        };

        let mut username = |command: &str| {
            args.next()
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Configuration(format!("usage: {command} <username>")))
        };

        match name.as_str() {
            "serve" => Ok(Self::Serve),
            "migrate" => Ok(Self::Migrate),
            "seed-sample" => Ok(Self::SeedSample),
            "create-user" => Ok(Self::CreateUser {
                username: username("create-user")?,
            }),
            "activate-user" => Ok(Self::SetUserActive {
                username: username("activate-user")?,
                is_active: true,
            }),
            "deactivate-user" => Ok(Self::SetUserActive {
                username: username("deactivate-user")?,
                is_active: false,
            }),
            other => Err(AppError::Configuration(format!(
                "unknown command '{other}'; expected serve, migrate, create-user, \
                 activate-user, deactivate-user or seed-sample"
            ))),
        }
    }
}

/// Runtime configuration of the API binary.
#[derive(Clone)]
pub struct ApiConfig {
    pub command: Command,
    pub database_url: String,
    /// Externally reachable origin without a trailing slash.
    pub public_base_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub session_idle_minutes: i64,
    pub email_provider: EmailProviderConfig,
    pub default_from_email: String,
    pub email_timeout: Duration,
}

impl ApiConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_sources(env::args().skip(1), |name| env::var(name).ok())
    }

    /// Builds the configuration from command arguments and a variable lookup.
    pub fn from_sources(
        args: impl Iterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let command = Command::from_args(args)?;
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = optional("DATABASE_URL")
            .ok_or_else(|| AppError::Configuration("DATABASE_URL is required".to_owned()))?;

        let public_base_url = parse_public_base_url(
            optional("PUBLIC_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_PUBLIC_BASE_URL),
        )?;

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", optional("API_PORT"), 8000_u16)?;
        let cookie_secure = optional("SESSION_COOKIE_SECURE")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        let session_idle_minutes =
            parse_or("SESSION_IDLE_MINUTES", optional("SESSION_IDLE_MINUTES"), 30_i64)?;
        if session_idle_minutes <= 0 {
            return Err(AppError::Configuration(
                "SESSION_IDLE_MINUTES must be positive".to_owned(),
            ));
        }

        let email_timeout_seconds =
            parse_or("EMAIL_TIMEOUT_SECONDS", optional("EMAIL_TIMEOUT_SECONDS"), 10_u64)?;
        if email_timeout_seconds == 0 {
            return Err(AppError::Configuration(
                "EMAIL_TIMEOUT_SECONDS must be positive".to_owned(),
            ));
        }

        let email_provider = match optional("EMAIL_PROVIDER")
            .unwrap_or_else(|| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "smtp" => {
                let host = optional("SMTP_HOST").ok_or_else(|| {
                    AppError::Configuration("SMTP_HOST is required for smtp".to_owned())
                })?;
                let tls = optional("SMTP_TLS")
                    .map(|value| value.parse::<SmtpTlsMode>())
                    .transpose()?
                    .unwrap_or_default();
                let default_port = match tls {
                    SmtpTlsMode::Tls => 465,
                    SmtpTlsMode::StartTls => 587,
                    SmtpTlsMode::None => 25,
                };

                EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                    host,
                    port: parse_or("SMTP_PORT", optional("SMTP_PORT"), default_port)?,
                    username: optional("SMTP_USERNAME"),
                    password: optional("SMTP_PASSWORD"),
                    tls,
                })
            }
            other => {
                return Err(AppError::Configuration(format!(
                    "EMAIL_PROVIDER must be either 'console' or 'smtp', got '{other}'"
                )));
            }
        };

        Ok(Self {
            command,
            database_url,
            public_base_url,
            api_host,
            api_port,
            cookie_secure,
            session_idle_minutes,
            email_provider,
            default_from_email: optional("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_owned()),
            email_timeout: Duration::from_secs(email_timeout_seconds),
        })
    }

    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Configuration(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_public_base_url(value: &str) -> AppResult<String> {
    let url = Url::parse(value)
        .map_err(|error| AppError::Configuration(format!("invalid PUBLIC_BASE_URL: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::Configuration(format!(
            "PUBLIC_BASE_URL must be an http(s) URL, got '{value}'"
        )));
    }

    Ok(value.trim().trim_end_matches('/').to_owned())
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|error| AppError::Configuration(format!("invalid {name} '{raw}': {error}")))
    })
}

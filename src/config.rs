//! Configuration types.
//!
//! Everything is read from the environment. `from_lookup` takes the lookup as
//! a closure so tests can supply their own variables.

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::mail::Envelope;
use crate::quiz::StepCatalog;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Port conventionally served with implicit TLS (SMTPS).
pub const SMTPS_PORT: u16 = 465;
pub const DEFAULT_MAIL_FROM: &str = "Marksen Media <onboarding@resend.dev>";
pub const DEFAULT_MAIL_TO: &str = "william@marksendigital.se";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<String>,
    pub mail: MailConfig,
    /// Steps served to front-ends and used by the wizard.
    pub catalog: StepCatalog,
}

/// Mail relay configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend: MailBackend,
    pub envelope: Envelope,
}

/// Which mail backend to use.
#[derive(Debug, Clone)]
pub enum MailBackend {
    Resend {
        api_key: SecretString,
        api_url: String,
    },
    Smtp(SmtpConfig),
    /// Log messages instead of sending them.
    Log,
}

impl MailBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resend { .. } => "resend",
            Self::Smtp(_) => "smtp",
            Self::Log => "log",
        }
    }
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub security: SmtpSecurity,
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connect, then upgrade with `STARTTLS` (submission, port 587).
    StartTls,
    /// TLS from the first byte (SMTPS, port 465).
    Wrapper,
}

impl SmtpSecurity {
    /// Mode conventionally used on `port`.
    pub fn for_port(port: u16) -> Self {
        if port == SMTPS_PORT {
            Self::Wrapper
        } else {
            Self::StartTls
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "wrapper" | "tls" | "smtps" => Ok(Self::Wrapper),
            other => Err(ConfigError::InvalidValue {
                key: "SMTP_TLS".into(),
                message: format!("unknown mode '{other}' (expected starttls or wrapper)"),
            }),
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.into()));

        let port = parse_port(get("LEAD_INTAKE_PORT"), "LEAD_INTAKE_PORT", DEFAULT_PORT)?;

        let backend_name = match get("MAIL_BACKEND") {
            Some(name) => name.to_lowercase(),
            None if get("RESEND_API_KEY").is_some() => "resend".to_string(),
            None => "log".to_string(),
        };
        let backend = match backend_name.as_str() {
            "resend" => MailBackend::Resend {
                api_key: SecretString::from(require("RESEND_API_KEY")?),
                api_url: get("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            },
            "smtp" => {
                let host = require("SMTP_HOST")?;
                let port = parse_port(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?;
                let security = match get("SMTP_TLS") {
                    Some(mode) => SmtpSecurity::parse(&mode)?,
                    None => SmtpSecurity::for_port(port),
                };
                MailBackend::Smtp(SmtpConfig {
                    host,
                    port,
                    username: require("SMTP_USERNAME")?,
                    password: SecretString::from(require("SMTP_PASSWORD")?),
                    security,
                })
            }
            "log" => MailBackend::Log,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "MAIL_BACKEND".into(),
                    message: format!("unknown backend '{other}' (expected resend, smtp or log)"),
                });
            }
        };

        let to: Vec<String> = get("MAIL_TO")
            .unwrap_or_else(|| DEFAULT_MAIL_TO.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if to.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "MAIL_TO".into(),
                message: "no recipients".into(),
            });
        }
        let envelope = Envelope {
            from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            to,
        };

        let catalog = match get("QUIZ_STEPS") {
            Some(list) => list.parse().map_err(|source| ConfigError::Catalog {
                key: "QUIZ_STEPS".into(),
                source,
            })?,
            None => StepCatalog::canonical(),
        };

        Ok(Self {
            port,
            allowed_origin: get("LEAD_INTAKE_ALLOWED_ORIGIN"),
            mail: MailConfig { backend, envelope },
            catalog,
        })
    }
}

fn parse_port(value: Option<String>, key: &str, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(v) => v.parse().map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: format!("'{v}': {e}"),
        }),
        None => Ok(default),
    }
}

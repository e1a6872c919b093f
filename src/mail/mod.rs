//! Outbound mail for both endpoints.
//!
//! Backends:
//! - `resend`: Resend HTTP API via reqwest
//! - `smtp`: any SMTP relay via lettre
//! - `log`: writes the message to the log and delivers nothing

pub mod log;
pub mod resend;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{MailBackend, MailConfig};
use crate::error::MailError;

pub use self::log::LogMailer;
pub use self::resend::ResendMailer;
pub use self::smtp::SmtpMailer;

/// A plain-text message ready to hand to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
}

/// Provider-assigned id of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

/// Fixed sender and recipients for every relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
}

impl Envelope {
    /// Address a message, replying to the submitter when one is known.
    pub fn message(
        &self,
        reply_to: Option<&str>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> OutgoingEmail {
        OutgoingEmail {
            from: self.from.clone(),
            to: self.to.clone(),
            reply_to: reply_to
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// Sends one message. Implementations do not retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailError>;
}

/// Build the configured backend.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match &config.backend {
        MailBackend::Resend { api_key, api_url } => {
            Arc::new(ResendMailer::new(api_key.clone(), api_url.clone()))
        }
        MailBackend::Smtp(smtp) => Arc::new(SmtpMailer::new(smtp)?),
        MailBackend::Log => Arc::new(LogMailer),
    };
    tracing::info!(backend = mailer.name(), "Mail backend ready");
    Ok(mailer)
}

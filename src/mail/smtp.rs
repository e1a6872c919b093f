//! SMTP backend via lettre.
//!
//! lettre's `SmtpTransport` is blocking, so each send runs on the blocking pool.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

use super::{DeliveryReceipt, Mailer, OutgoingEmail};
use crate::config::{SmtpConfig, SmtpSecurity};
use crate::error::MailError;

pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let builder = match config.security {
            SmtpSecurity::StartTls => SmtpTransport::starttls_relay(&config.host),
            SmtpSecurity::Wrapper => SmtpTransport::relay(&config.host),
        };
        let transport = builder
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build the lettre message for `email`.
fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(mailbox(&email.from)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN);
    for to in &email.to {
        builder = builder.to(mailbox(to)?);
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }
    builder
        .body(email.text.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let message = build_message(&email)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Transport(format!("SMTP task failed: {e}")))?
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let id = format!("smtp-{}", uuid::Uuid::new_v4());
        tracing::info!(%id, to = ?email.to, "Email sent via SMTP");
        Ok(DeliveryReceipt { id })
    }
}

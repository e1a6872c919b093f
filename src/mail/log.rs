//! Log-only mailer for local development.

use async_trait::async_trait;

use super::{DeliveryReceipt, Mailer, OutgoingEmail};
use crate::error::MailError;

/// Logs every message instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let id = format!("log-{}", uuid::Uuid::new_v4());
        tracing::info!(
            %id,
            to = ?email.to,
            reply_to = ?email.reply_to,
            subject = %email.subject,
            "Mail not sent (log backend)\n{}",
            email.text
        );
        Ok(DeliveryReceipt { id })
    }
}

//! HTTP client for `POST /api/quiz`, used as the wizard's dispatcher.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::MailError;
use crate::mail::DeliveryReceipt;
use crate::quiz::{QuizDispatcher, QuizDocument};

const PROVIDER: &str = "lead-intake";

#[derive(Debug, Deserialize)]
struct SentBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts finished quizzes to a lead-intake server.
#[derive(Debug, Clone)]
pub struct QuizClient {
    client: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuizDispatcher for QuizClient {
    async fn dispatch(&self, document: QuizDocument) -> Result<DeliveryReceipt, MailError> {
        let resp = self
            .client
            .post(format!("{}/api/quiz", self.base_url))
            .json(document.fields())
            .send()
            .await
            .map_err(|e| MailError::RequestFailed {
                provider: PROVIDER.into(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| MailError::RequestFailed {
            provider: PROVIDER.into(),
            reason: format!("Failed to read response body ({status}): {e}"),
        })?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("server returned {status}"));
            return Err(MailError::Rejected {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                message,
            });
        }

        let sent: SentBody = serde_json::from_str(&body).map_err(|e| MailError::RequestFailed {
            provider: PROVIDER.into(),
            reason: format!("Unexpected response body: {e}"),
        })?;
        Ok(DeliveryReceipt { id: sent.id })
    }
}

//! Resend backend: `POST {api_url}/emails` with a bearer key.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{DeliveryReceipt, Mailer, OutgoingEmail};
use crate::error::MailError;

const PROVIDER: &str = "resend";

/// Error payload returned by the Resend API.
#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_key: SecretString,
    api_url: String,
}

impl ResendMailer {
    pub fn new(api_key: SecretString, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.api_url)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let resp = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&email)
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
            // Fall back to the raw body when the provider sent no JSON message.
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| format!("{PROVIDER} returned {status}: {body}"));
            tracing::warn!(status = status.as_u16(), %message, "Resend rejected email");
            return Err(MailError::Rejected {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                message,
            });
        }

        let receipt: DeliveryReceipt =
            serde_json::from_str(&body).map_err(|e| MailError::RequestFailed {
                provider: PROVIDER.into(),
                reason: format!("Unexpected response body: {e}"),
            })?;
        tracing::info!(id = %receipt.id, subject = %email.subject, "Email sent via Resend");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "a@b.se".into(),
            to: vec!["c@d.se".into()],
            reply_to: None,
            subject: "s".into(),
            text: "t".into(),
        }
    }

    /// Serve one request with a canned raw HTTP response, return the base URL.
    async fn one_shot_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // Read headers plus the declared body before answering.
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn url_has_no_double_slash() {
        let mailer = ResendMailer::new(SecretString::from("re_test"), "http://localhost:9/");
        assert_eq!(mailer.emails_url(), "http://localhost:9/emails");
    }

    #[tokio::test]
    async fn unreachable_api_is_request_failure() {
        // Port 9 (discard) is closed on test machines.
        let mailer = ResendMailer::new(SecretString::from("re_test"), "http://127.0.0.1:9");
        let err = mailer.send(email()).await.unwrap_err();
        assert!(matches!(err, MailError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn error_payload_message_is_surfaced() {
        let base = one_shot_server(
            "HTTP/1.1 403 Forbidden\r\nContent-Type: application/json\r\nContent-Length: 32\r\n\r\n{\"message\":\"API key is invalid\"}",
        )
        .await;
        let mailer = ResendMailer::new(SecretString::from("re_test"), base);
        let err = mailer.send(email()).await.unwrap_err();
        match err {
            MailError::Rejected {
                status, message, ..
            } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key is invalid");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn truncated_body_is_request_failure() {
        // Declares 100 bytes, sends 10, then closes.
        let base = one_shot_server(
            "HTTP/1.1 422 Unprocessable Entity\r\nContent-Length: 100\r\n\r\n{\"message\"",
        )
        .await;
        let mailer = ResendMailer::new(SecretString::from("re_test"), base);
        let err = mailer.send(email()).await.unwrap_err();
        match err {
            MailError::RequestFailed { reason, .. } => {
                assert!(reason.starts_with("Failed to read response body"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

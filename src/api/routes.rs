//! REST endpoints for contact messages and quiz submissions.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::contact::ContactMessage;
use crate::error::MailError;
use crate::mail::{DeliveryReceipt, Envelope, Mailer, OutgoingEmail};
use crate::quiz::{FieldKey, FieldStore, QuizDocument, StepCatalog};

/// Shared state for the API routes.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
    pub envelope: Envelope,
    pub catalog: Arc<StepCatalog>,
}

/// Endpoint failure, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the given message.
    BadRequest(&'static str),
    /// 500 carrying the mail provider's message.
    Mail(MailError),
    /// 500 with a generic message.
    Internal(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            Self::Mail(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<MailError> for ApiError {
    fn from(e: MailError) -> Self {
        Self::Mail(e)
    }
}

/// Unreadable bodies get the same answer as any other unexpected failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::error!(error = %rejection.body_text(), "API error: unreadable request body");
        Self::Internal("Failed to send email")
    }
}

/// Build the API routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(post_contact))
        .route("/api/quiz", post(post_quiz))
        .route("/api/quiz/steps", get(get_steps))
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "lead-intake"
    }))
}

// ── Relay ───────────────────────────────────────────────────────────────

async fn relay(state: &AppState, email: OutgoingEmail) -> Result<DeliveryReceipt, ApiError> {
    state.mailer.send(email).await.map_err(|e| {
        tracing::error!(backend = state.mailer.name(), error = %e, "Mail provider error");
        ApiError::from(e)
    })
}

fn sent(receipt: DeliveryReceipt) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "id": receipt.id }))
}

/// POST /api/contact
///
/// Requires name, email and message. Phone is optional.
async fn post_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(message) = body?;
    let Some(contact) = message.validate() else {
        tracing::info!("Contact message rejected: missing required fields");
        return Err(ApiError::BadRequest("Missing required fields"));
    };

    let email = state
        .envelope
        .message(Some(contact.email), contact.subject(), contact.render());
    let receipt = relay(&state, email).await?;
    tracing::info!(id = %receipt.id, name = %contact.name, "Contact message relayed");
    Ok(sent(receipt))
}

/// POST /api/quiz
///
/// Accepts the committed quiz answers as-is; the wizard has already
/// validated them.
async fn post_quiz(
    State(state): State<AppState>,
    body: Result<Json<FieldStore>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(fields) = body?;
    let document = QuizDocument::from_store(&fields);

    let email = state
        .envelope
        .message(document.reply_to(), document.subject(), document.body());
    let receipt = relay(&state, email).await?;
    tracing::info!(
        id = %receipt.id,
        company = fields.text(FieldKey::Company).unwrap_or_default(),
        "Quiz submission relayed"
    );
    Ok(sent(receipt))
}

/// GET /api/quiz/steps
///
/// The configured step catalog, with required keys and answer options.
async fn get_steps(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.descriptors())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    /// Records sent mail; fails when `reject` is set.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        reject: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, email: OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
            if self.reject {
                return Err(MailError::Rejected {
                    provider: "recording".into(),
                    status: 422,
                    message: "Invalid `to` field".into(),
                });
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(email);
            Ok(DeliveryReceipt {
                id: format!("msg-{}", sent.len()),
            })
        }
    }

    fn app(mailer: Arc<RecordingMailer>) -> Router {
        api_routes(AppState {
            mailer,
            envelope: Envelope {
                from: "Marksen Media <onboarding@resend.dev>".into(),
                to: vec!["william@marksendigital.se".into()],
            },
            catalog: Arc::new(StepCatalog::canonical()),
        })
    }

    async fn call(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_service() {
        let (status, body) = call(app(Arc::default()), "GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "service": "lead-intake"}));
    }

    #[tokio::test]
    async fn contact_missing_fields_is_400_without_mail() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, body) = call(
            app(Arc::clone(&mailer)),
            "POST",
            "/api/contact",
            r#"{"name":"Jane","message":"Hej"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing required fields"}));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn contact_is_relayed_with_reply_to() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, body) = call(
            app(Arc::clone(&mailer)),
            "POST",
            "/api/contact",
            r#"{"name":"Jane","email":"jane@acme.se","message":"Hej"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "id": "msg-1"}));

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].reply_to.as_deref(), Some("jane@acme.se"));
        assert_eq!(sent[0].subject, "Nytt kontaktmeddelande från Jane");
        assert!(sent[0].text.contains("**Telefon:** Ej angivet"));
    }

    #[tokio::test]
    async fn malformed_json_is_500() {
        let (status, body) = call(app(Arc::default()), "POST", "/api/quiz", "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to send email"}));
    }

    #[tokio::test]
    async fn provider_error_message_is_returned() {
        let mailer = Arc::new(RecordingMailer {
            reject: true,
            ..Default::default()
        });
        let (status, body) = call(app(mailer), "POST", "/api/quiz", r#"{"company":"Acme"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Invalid `to` field"}));
    }

    #[tokio::test]
    async fn quiz_accepts_partial_store() {
        let mailer = Arc::new(RecordingMailer::default());
        let (status, _) = call(app(Arc::clone(&mailer)), "POST", "/api/quiz", "{}").await;
        assert_eq!(status, StatusCode::OK);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "Ny Quiz-inlämning: Ej angivet");
        assert_eq!(sent[0].reply_to, None);
    }

    #[tokio::test]
    async fn steps_lists_catalog() {
        let (status, body) = call(app(Arc::default()), "GET", "/api/quiz/steps", "").await;
        assert_eq!(status, StatusCode::OK);
        let steps = body.as_array().unwrap();
        assert_eq!(steps.len(), 10);
        assert_eq!(steps[0]["kind"], "page_scope");
        assert_eq!(steps[9]["kind"], "contact");
    }
}

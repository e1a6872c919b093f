use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

use lead_intake::api::{AppState, api_routes};
use lead_intake::config::AppConfig;
use lead_intake::mail::build_mailer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage. Fails only if one is
    // already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let mailer = build_mailer(&config.mail).context("Failed to set up mail backend")?;

    eprintln!("📨 Lead Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Mail backend: {}", config.mail.backend.name());
    eprintln!("   Recipients: {}", config.mail.envelope.to.join(", "));
    eprintln!("   Quiz steps: {}", config.catalog.len());
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = match &config.allowed_origin {
        Some(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid LEAD_INTAKE_ALLOWED_ORIGIN: {origin}"))?,
        ),
        None => cors.allow_origin(Any),
    };

    let app = api_routes(AppState {
        mailer,
        envelope: config.mail.envelope.clone(),
        catalog: Arc::new(config.catalog.clone()),
    })
    .layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "Lead intake server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}

//! HTTP surface: the axum router and a client for the quiz endpoint.

pub mod client;
pub mod routes;

pub use client::QuizClient;
pub use routes::{ApiError, AppState, api_routes};

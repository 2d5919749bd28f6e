//! HTTP gateway (Axum) exposing the scorer.
//!
//! - `POST /score`, `POST /api/score`: score a transcript.
//! - `GET /health`: readiness of the rubric and encoder.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{ScoreRequest, score_handler};
pub use state::HandlerState;

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_UNHEALTHY: &str = "unhealthy";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/score", post(score_handler))
        .route("/api/score", post(score_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub rubric_loaded: bool,
    pub model_ready: bool,
    pub encoder_mode: String,
}

/// 200 when the scorer is ready, 503 otherwise.
#[tracing::instrument(skip(state))]
pub async fn health_handler(State(state): State<HandlerState>) -> Response {
    let ready = state.service.is_ready();
    let (status_code, status) = if ready {
        (StatusCode::OK, STATUS_HEALTHY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, STATUS_UNHEALTHY)
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            rubric_loaded: state.service.rubric_loaded(),
            model_ready: ready,
            encoder_mode: state.service.encoder_mode().to_string(),
        }),
    )
        .into_response()
}

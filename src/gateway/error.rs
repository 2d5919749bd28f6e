use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Scorer not initialized. Check rubric and model configuration.")]
    NotReady,

    #[error("Scoring failed: {0}")]
    ScoringFailed(ScoringError),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ScoringError> for GatewayError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::NotReady => GatewayError::NotReady,
            ScoringError::EmptyTranscript => {
                GatewayError::InvalidRequest(MISSING_TRANSCRIPT.to_string())
            }
            other => GatewayError::ScoringFailed(other),
        }
    }
}

pub const MISSING_TRANSCRIPT: &str = "Missing required field: transcript";
pub const BODY_NOT_JSON: &str = "Request body must be JSON";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::ScoringFailed(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            status: "error".to_string(),
        });

        (status, body).into_response()
    }
}

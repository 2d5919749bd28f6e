use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::error::{BODY_NOT_JSON, GatewayError, MISSING_TRANSCRIPT};
use super::state::HandlerState;
use crate::scoring::{ScoreReport, WeightOverrides};

/// Body of `POST /score`.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub config: Option<WeightOverrides>,
}

/// Parses a score request, mapping every malformed body to a 400.
pub fn parse_score_request(body: &[u8]) -> Result<ScoreRequest, GatewayError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| GatewayError::InvalidRequest(BODY_NOT_JSON.to_string()))?;

    if !value.is_object() {
        return Err(GatewayError::InvalidRequest(BODY_NOT_JSON.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Json<ScoreReport>, GatewayError> {
    if !state.service.is_ready() {
        return Err(GatewayError::NotReady);
    }

    let request = parse_score_request(&body)?;
    let transcript = request
        .transcript
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest(MISSING_TRANSCRIPT.to_string()))?;

    info!(chars = transcript.len(), "Scoring transcript");

    let service = state.service.clone();
    let overrides = request.config;
    let report = tokio::task::spawn_blocking(move || {
        service.score(&transcript, overrides.as_ref())
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("scoring task failed: {}", e)))??;

    debug!(overall_score = report.overall_score, "Score computed");
    Ok(Json(report))
}

//! Chat endpoint
//!
//! `POST /gemini` relays `{history, message}` to the conversational model
//! and answers `{text}`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    chat::{GenerationReply, GenerationRequest},
    error::AppError,
    routes::metrics::record_request,
    AppState,
};

/// Handle chat requests
///
/// Failures are rendered as a JSON error body; provider failures map to 500.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationReply>, AppError> {
    let start_time = Instant::now();

    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Rejected chat request body");
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(format!("Invalid request body: {}", e.body_text()))
        }
    })?;

    info!(history = request.history.len(), "Processing chat request");

    let result = state.chat.relay(request.history, request.message).await;
    let duration = start_time.elapsed().as_secs_f64();

    match result {
        Ok(reply) => {
            record_request("gemini", "success", duration);
            info!(
                duration_ms = %format!("{:.2}", duration * 1000.0),
                "Chat request completed"
            );
            Ok(Json(reply))
        }
        Err(e) => {
            record_request("gemini", "error", duration);
            warn!(error = %e, "Chat request failed");
            Err(e)
        }
    }
}

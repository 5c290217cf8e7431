//! HTTP request handlers for the proxy API.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eas_cache::CacheDebug;
use serde::Serialize;

use crate::state::AppState;

/// Body returned by `/json-feed` before any fetch has ever succeeded.
#[derive(Debug, Serialize)]
pub struct NoDataResponse {
    /// Human-readable explanation.
    pub message: String,
}

/// Handle GET /json-feed - the current cached alert state.
///
/// Returns 200 with the cache entry, or a documented 503 when no state
/// exists yet (fresh deployment, empty durable tier, no successful fetch).
/// Pipeline failures never surface here; a stale-but-present entry is
/// served as-is.
pub async fn json_feed(State(state): State<Arc<AppState>>) -> Response {
    match state.cache().read_current().await {
        Some(entry) => Json(entry).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(NoDataResponse {
                message: "No alerts available yet.".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Handle GET /debug - raw status of both cache tiers.
pub async fn debug_status(State(state): State<Arc<AppState>>) -> Json<CacheDebug> {
    Json(state.cache().debug_status().await)
}

/// Handle GET /ping - liveness check.
pub async fn ping() -> &'static str {
    "pong"
}

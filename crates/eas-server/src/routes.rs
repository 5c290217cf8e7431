//! Route configuration for the proxy API.

use std::sync::Arc;

use axum::routing::{Router, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{debug_status, json_feed, ping};
use crate::state::AppState;

/// Create the proxy API router.
///
/// CORS is wide open: the consumers are read-only dashboards and signage
/// on arbitrary origins, and nothing served here is sensitive.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/json-feed", get(json_feed))
        .route("/debug", get(debug_status))
        .route("/ping", get(ping))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub mod api;

use crate::state::AppState;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// GET /health -- liveness probe
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(api::build_api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

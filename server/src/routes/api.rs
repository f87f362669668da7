//! REST API endpoints

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tracing::{debug, instrument};

use crate::state::AppState;

/// Create API router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(app_status))
}

/// Health check endpoint
#[instrument]
async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");
    Json(json!({
        "status": "ok",
        "service": "epub-creator",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Resolved environment, base path and route table
#[instrument(skip(state))]
async fn app_status(State(state): State<AppState>) -> impl IntoResponse {
    let router = state.router();
    let routes: Vec<_> = router
        .table()
        .routes()
        .iter()
        .map(|route| {
            json!({
                "name": route.name(),
                "path": route.path(),
                "href": router.base().href(route.path()),
                "title": route.title(),
            })
        })
        .collect();

    Json(json!({
        "status": "running",
        "mode": state.environment.mode,
        "command": state.environment.command,
        "base_path": router.base(),
        "routes": routes,
        "icons": state.app.components().icon_count(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}

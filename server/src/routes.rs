//! HTTP routes
//!
//! Page requests are not matched by axum: every path that is not an API or
//! static asset route falls through to the application router, which strips
//! the base path, resolves the route and runs the navigation guards.

mod api;
mod pages;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create the main router
pub fn app_routes(state: AppState) -> Router {
    let static_path = state.router().base().href("/static");
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // REST API routes
        .nest("/api/v1", api::routes())
        // Static assets under the base path
        .nest_service(&static_path, ServeDir::new(static_dir))
        // Pages
        .fallback(pages::page)
        .with_state(state)
}

// ============================================================================
// Error Handling
// ============================================================================

/// Error type for page handlers
#[derive(Debug)]
pub enum AppError {
    TemplateError(String),
    NavigationError(String),
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::TemplateError(msg) => {
                tracing::error!("Template error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {}", msg))
            }
            AppError::NavigationError(msg) => {
                tracing::warn!("Navigation error: {}", msg);
                (StatusCode::CONFLICT, msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg))
            }
        };

        (status, Html(message)).into_response()
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::TemplateError(err.to_string())
    }
}

impl From<epub_creator_core::Error> for AppError {
    fn from(err: epub_creator_core::Error) -> Self {
        match err {
            epub_creator_core::Error::NavigationAborted(_) => {
                AppError::NavigationError(err.to_string())
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}

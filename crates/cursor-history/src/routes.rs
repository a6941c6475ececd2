use axum::{Router, routing::get};

use crate::AppState;
use crate::handlers;

/// Create the read-only API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/workspaces", get(handlers::list_workspaces))
        .route("/composers/{id}", get(handlers::get_composer))
}

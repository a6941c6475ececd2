use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;
use crate::error::CursorError;
use crate::workspaces::{self, WorkspaceEntry};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub root: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        root: state.storage_root().display().to_string(),
    })
}

/// `GET /workspaces`
pub async fn list_workspaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkspaceEntry>>, CursorError> {
    let root = state.storage_root();
    let list = workspaces::list_workspaces(&root, &state.config).await?;
    Ok(Json(list))
}

/// `GET /composers/{id}`
pub async fn get_composer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CursorError> {
    let root = state.storage_root();
    let composer = workspaces::find_composer(&root, &state.config, &id).await?;
    Ok(Json(composer))
}

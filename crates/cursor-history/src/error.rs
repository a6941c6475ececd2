use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that reach the HTTP layer.
///
/// Failures local to a single workspace never become a `CursorError`; the
/// aggregator logs and drops them.
#[derive(Error, Debug)]
pub enum CursorError {
    #[error("Workspace directory does not exist: {}", .0.display())]
    StorageRootMissing(PathBuf),

    #[error("Composer not found")]
    ComposerNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CursorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CursorError::ComposerNotFound => StatusCode::NOT_FOUND,
            CursorError::StorageRootMissing(_) | CursorError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CursorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), message = %message, "Request failed");
        } else {
            debug!(status = status.as_u16(), message = %message, "Client error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

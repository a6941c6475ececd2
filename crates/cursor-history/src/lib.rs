//! Read-only HTTP API over Cursor's per-workspace state.
//!
//! Cursor keeps one directory per workspace under its `workspaceStorage`
//! folder, each holding a SQLite `state.vscdb` key/value store and usually a
//! `workspace.json` descriptor. This crate scans those directories and
//! serves the workspace list and individual composer sessions as JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scanner;
pub mod sidecar;
pub mod state_db;
pub mod storage_root;
pub mod workspaces;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::CursorError;
use storage_root::{HostEnv, Platform, resolve_storage_root};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub platform: Platform,
    pub host_env: HostEnv,
    pub config: Arc<Config>,
}

impl AppState {
    /// State for the current host. The storage root override, if any, is
    /// `config.workspace_path`.
    pub fn new(config: Config) -> Self {
        Self {
            platform: Platform::current(),
            host_env: HostEnv::capture(),
            config: Arc::new(config),
        }
    }

    /// State serving a fixed storage root.
    pub fn with_root(root: impl Into<PathBuf>, mut config: Config) -> Self {
        let root: PathBuf = root.into();
        config.workspace_path = Some(root.to_string_lossy().into_owned());
        Self::new(config)
    }

    /// Resolve the storage root for the current request.
    pub fn storage_root(&self) -> PathBuf {
        resolve_storage_root(
            self.config.workspace_path.as_deref(),
            self.platform,
            &self.host_env,
        )
    }
}

/// Build the application router with logging and CORS layers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

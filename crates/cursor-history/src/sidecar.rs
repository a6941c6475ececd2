//! Best-effort reader for a workspace's `workspace.json` descriptor.

use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WorkspaceDescriptor {
    #[serde(default)]
    folder: Option<String>,
}

/// Folder URI the workspace is bound to, if the descriptor names one.
///
/// A missing, unreadable, or malformed file yields `None`.
pub async fn read_folder(path: &Path) -> Option<String> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            debug!("No workspace descriptor at {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_slice::<WorkspaceDescriptor>(&content) {
        Ok(descriptor) => descriptor.folder,
        Err(e) => {
            debug!("Malformed workspace descriptor {}: {}", path.display(), e);
            None
        }
    }
}

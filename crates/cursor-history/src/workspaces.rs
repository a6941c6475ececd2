//! Workspace listing and composer lookup across the storage root.
//!
//! Both operations walk the candidate workspaces sequentially. A workspace
//! whose database cannot be opened or queried is logged and left out; only
//! an inaccessible storage root fails the whole request.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::CursorError;
use crate::scanner::{WorkspaceDir, WorkspaceScan, scan_workspaces};
use crate::sidecar;
use crate::state_db::read_document;

/// One workspace as reported by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEntry {
    /// Directory name under the storage root
    pub id: String,
    /// Path to the workspace's state database
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub last_modified: DateTime<Utc>,
    pub chat_count: usize,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Legacy AI chat panel state. Only the tab count is used.
#[derive(Debug, Default, Deserialize)]
pub struct ChatData {
    #[serde(default)]
    pub tabs: Vec<Value>,
}

/// Composer sessions of one workspace, in stored order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerData {
    #[serde(default)]
    pub all_composers: Vec<Value>,
}

impl ComposerData {
    /// First composer whose `composerId` equals `id`.
    pub fn take_composer(self, id: &str) -> Option<Value> {
        self.all_composers
            .into_iter()
            .find(|c| c.get("composerId").and_then(Value::as_str) == Some(id))
    }
}

/// List every workspace under `root` that carries a state database.
pub async fn list_workspaces(
    root: &Path,
    config: &Config,
) -> Result<Vec<WorkspaceEntry>, CursorError> {
    let candidates = scan_workspaces(root, &config.database_file).await?;

    let mut workspaces = Vec::with_capacity(candidates.len());
    for ws in &candidates {
        match load_entry(ws, config).await {
            Ok(entry) => workspaces.push(entry),
            Err(e) => warn!("Error processing workspace {}: {:#}", ws.id, e),
        }
    }

    info!(
        "Listed {} workspaces ({} candidates) in {}",
        workspaces.len(),
        candidates.len(),
        root.display()
    );
    Ok(workspaces)
}

async fn load_entry(ws: &WorkspaceDir, config: &Config) -> Result<WorkspaceEntry> {
    let chat: Option<ChatData> = read_document(&ws.db_path, &config.chat_data_key).await?;
    let folder = sidecar::read_folder(&ws.dir.join(&config.sidecar_file)).await;

    Ok(WorkspaceEntry {
        id: ws.id.clone(),
        path: ws.db_path.to_string_lossy().into_owned(),
        folder,
        last_modified: ws.db_modified,
        chat_count: chat.map(|c| c.tabs.len()).unwrap_or(0),
    })
}

/// Find the composer with `composer_id`, scanning workspaces in listing
/// order and stopping at the first match. Workspaces after the match are
/// never visited.
pub async fn find_composer(
    root: &Path,
    config: &Config,
    composer_id: &str,
) -> Result<Value, CursorError> {
    let mut scan = WorkspaceScan::open(root, &config.database_file).await?;

    while let Some(ws) = scan.next_workspace().await? {
        let data: Option<ComposerData> =
            match read_document(&ws.db_path, &config.composer_data_key).await {
                Ok(data) => data,
                Err(e) => {
                    warn!("Error reading composers of workspace {}: {:#}", ws.id, e);
                    continue;
                }
            };

        if let Some(composer) = data.and_then(|d| d.take_composer(composer_id)) {
            debug!("Found composer {} in workspace {}", composer_id, ws.id);
            return Ok(composer);
        }
    }

    Err(CursorError::ComposerNotFound)
}

//! Workspace directory enumeration.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::fs::{self, ReadDir};
use tracing::{debug, warn};

use crate::error::CursorError;

/// A workspace directory that carries a state database.
#[derive(Debug, Clone)]
pub struct WorkspaceDir {
    /// Directory name, used as the workspace id
    pub id: String,
    pub dir: PathBuf,
    pub db_path: PathBuf,
    /// Modification time of the state database
    pub db_modified: DateTime<Utc>,
}

/// Lazy walk over the candidate workspaces under a storage root, in
/// directory-listing order.
///
/// Entries that are not directories, or that lack the database file, are
/// skipped without error.
pub struct WorkspaceScan {
    entries: ReadDir,
    database_file: String,
}

impl WorkspaceScan {
    /// Start scanning `root`. Fails only when the root itself is inaccessible.
    pub async fn open(root: &Path, database_file: &str) -> Result<Self, CursorError> {
        if fs::metadata(root).await.is_err() {
            return Err(CursorError::StorageRootMissing(root.to_path_buf()));
        }

        Ok(Self {
            entries: fs::read_dir(root).await?,
            database_file: database_file.to_string(),
        })
    }

    /// Next candidate workspace, or `None` once the listing is exhausted.
    pub async fn next_workspace(&mut self) -> Result<Option<WorkspaceDir>, CursorError> {
        while let Some(entry) = self.entries.next_entry().await? {
            let id = entry.file_name().to_string_lossy().into_owned();

            match entry.file_type().await {
                Ok(ft) if ft.is_dir() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!("Failed to stat workspace entry {}: {}", id, e);
                    continue;
                }
            }

            if let Some(ws) = self.candidate(id, entry.path()).await {
                return Ok(Some(ws));
            }
        }
        Ok(None)
    }

    async fn candidate(&self, id: String, dir: PathBuf) -> Option<WorkspaceDir> {
        let database_file = &self.database_file;
        let db_path = dir.join(database_file);

        // A missing database is the normal "not a workspace" case. Anything
        // opened later may still vanish; readers treat that as a skip too.
        let metadata = match fs::metadata(&db_path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => {
                debug!("Skipping {}: {} is not a file", id, database_file);
                return None;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Skipping {}: no {} found", id, database_file);
                return None;
            }
            Err(e) => {
                warn!("Skipping {}: cannot stat {}: {}", id, database_file, e);
                return None;
            }
        };

        let db_modified = match metadata.modified() {
            Ok(t) => match to_utc(t) {
                Some(ts) => ts,
                None => {
                    warn!("Skipping {}: modification time {:?} out of range", id, t);
                    return None;
                }
            },
            Err(e) => {
                warn!("Skipping {}: no modification time: {}", id, e);
                return None;
            }
        };

        Some(WorkspaceDir {
            id,
            dir,
            db_path,
            db_modified,
        })
    }
}

/// Convert a filesystem timestamp, or `None` if chrono cannot represent it.
pub fn to_utc(t: SystemTime) -> Option<DateTime<Utc>> {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => DateTime::from_timestamp(i64::try_from(d.as_secs()).ok()?, d.subsec_nanos()),
        Err(e) => {
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).ok()?;
            DateTime::from_timestamp(secs.checked_neg()?, 0)?
                .checked_sub_signed(TimeDelta::nanoseconds(i64::from(d.subsec_nanos())))
        }
    }
}

/// Collect every candidate workspace under `root`.
pub async fn scan_workspaces(
    root: &Path,
    database_file: &str,
) -> Result<Vec<WorkspaceDir>, CursorError> {
    let mut scan = WorkspaceScan::open(root, database_file).await?;
    let mut workspaces = Vec::new();
    while let Some(ws) = scan.next_workspace().await? {
        workspaces.push(ws);
    }

    debug!(
        "Found {} candidate workspaces in {}",
        workspaces.len(),
        root.display()
    );
    Ok(workspaces)
}

//! Test utilities: on-disk storage roots shaped like Cursor's.

use std::fs;
use std::path::Path;

use axum::Router;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use tempfile::TempDir;

use cursor_history::{AppState, Config};

pub const CHAT_DATA_KEY: &str = cursor_history::config::CHAT_DATA_KEY;
pub const COMPOSER_DATA_KEY: &str = cursor_history::config::COMPOSER_DATA_KEY;

/// Router serving `root` as the storage root.
pub fn test_app(root: &Path) -> Router {
    cursor_history::app(AppState::with_root(root, Config::default()))
}

/// Create a workspace directory whose `state.vscdb` holds `rows`.
pub async fn add_workspace(root: &Path, id: &str, rows: &[(&str, &str)]) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();

    let options = SqliteConnectOptions::new()
        .filename(dir.join("state.vscdb"))
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    sqlx::query("CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)")
        .execute(&mut conn)
        .await
        .unwrap();
    for (key, value) in rows {
        sqlx::query("INSERT INTO ItemTable (key, value) VALUES (?, ?)")
            .bind(*key)
            .bind(*value)
            .execute(&mut conn)
            .await
            .unwrap();
    }
    conn.close().await.unwrap();
}

pub fn write_sidecar(root: &Path, id: &str, content: &str) {
    fs::write(root.join(id).join("workspace.json"), content).unwrap();
}

pub fn storage_root() -> TempDir {
    TempDir::new().unwrap()
}

//! Read-only access to a workspace's `state.vscdb`.
//!
//! The database is a VS Code style key/value store: a single
//! `ItemTable(key TEXT, value BLOB)` table whose values are JSON text.
//! Every read opens its own connection and closes it before returning;
//! handles are never shared between workspaces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, QueryBuilder, Row, Sqlite};
use tracing::{debug, warn};

/// An open, read-only handle on one workspace database.
pub struct StateDb {
    conn: SqliteConnection,
    path: PathBuf,
}

impl StateDb {
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        let conn = SqliteConnection::connect_with(&options)
            .await
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Fetch the raw values stored under `keys`. Keys without a row, or
    /// whose value is NULL, are absent from the result.
    pub async fn get_many(&mut self, keys: &[&str]) -> Result<HashMap<String, Vec<u8>>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT [key], value FROM ItemTable WHERE value IS NOT NULL AND [key] IN (",
        );
        let mut separated = query.separated(", ");
        for key in keys {
            separated.push_bind(*key);
        }
        separated.push_unseparated(")");

        let rows = query
            .build()
            .fetch_all(&mut self.conn)
            .await
            .with_context(|| format!("querying ItemTable in {}", self.path.display()))?;

        let mut values = HashMap::with_capacity(rows.len());
        for row in rows {
            // The value column is declared BLOB but usually holds TEXT;
            // reading bytes accepts both storage classes.
            let key: String = row.try_get("key")?;
            let value: Vec<u8> = row.try_get("value")?;
            values.insert(key, value);
        }
        Ok(values)
    }

    pub async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get_many(&[key]).await?.remove(key))
    }

    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            debug!("Error closing {}: {}", self.path.display(), e);
        }
    }
}

/// Open `db_path`, read the JSON document stored under `key`, and close the
/// database again whatever the outcome.
///
/// Returns `Ok(None)` when the key is absent or its value is not valid JSON
/// for `T` (the parse failure is logged). Open and query failures are
/// returned as errors.
pub async fn read_document<T: DeserializeOwned>(db_path: &Path, key: &str) -> Result<Option<T>> {
    let mut db = StateDb::open(db_path).await?;
    let raw = db.get(key).await;
    db.close().await;

    Ok(raw?.and_then(|bytes| parse_document(&bytes, key, db_path)))
}

fn parse_document<T: DeserializeOwned>(raw: &[u8], key: &str, db_path: &Path) -> Option<T> {
    match serde_json::from_slice(raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!("Error parsing {} in {}: {}", key, db_path.display(), e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use sqlx::Connection;
    use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};

    /// Create a `state.vscdb` at `path` holding the given key/value rows.
    pub async fn create_state_db(path: &Path, rows: &[(&str, Option<&str>)]) {
        let options = SqliteConnectOptions::new()
            .filename(path)
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
}

/*!
 * SQLite implementation of the key-value store.
 *
 * One connection per store, shared between clones. Every statement runs on
 * tokio's blocking pool so the runtime never waits on disk I/O.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{KeyValueStore, schema};
use crate::errors::SettingsError;

/// Directory created under the user's data directory
const APP_DIRNAME: &str = "baba";

/// Database file inside [`APP_DIRNAME`]
const DB_FILENAME: &str = "baba.db";

/// Key-value store persisted in the `kv_store` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the store at the given file, creating parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Storage(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }

        debug!("Opening settings database at {:?}", path);
        let conn = Connection::open(&path)?;
        Self::with_connection(path, conn)
    }

    /// Open the store at [`SqliteStore::default_path`]
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(Self::default_path()?)
    }

    /// Open an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, SettingsError> {
        Self::with_connection(PathBuf::from(":memory:"), Connection::open_in_memory()?)
    }

    /// `<data_local_dir>/baba/baba.db`, falling back to `~/.local/share`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .map(|base| base.join(APP_DIRNAME).join(DB_FILENAME))
            .ok_or_else(|| SettingsError::Storage("Could not determine data directory".to_string()))
    }

    /// File backing this store, `:memory:` for in-memory stores
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_connection(path: PathBuf, conn: Connection) -> Result<Self, SettingsError> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a statement against the connection on the blocking pool
    async fn blocking<F, T>(&self, f: F) -> Result<T, SettingsError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || f(&*conn.lock()))
            .await
            .map_err(|e| SettingsError::Storage(format!("Storage task failed: {}", e)))?;
        Ok(result?)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let key = key.to_string();
        self.blocking(move |conn| {
            conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| row.get(0))
                .optional()
        })
        .await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let key = key.to_string();
        let value = value.to_string();
        debug!("Writing {} bytes under {}", value.len(), key);

        self.blocking(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .map(|_| ())
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<(), SettingsError> {
        let key = key.to_string();
        self.blocking(move |conn| conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key]).map(|_| ()))
            .await
    }
}

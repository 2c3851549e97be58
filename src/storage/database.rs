//! # Database Handle
//!
//! Per-request connection factory shared by the HTTP handlers.
//!
//! The handle only carries the database path. Each request opens its own
//! connection through [`Database::connect`] or [`Database::run`]; nothing is
//! pooled or reused across requests.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::trace;

use super::errors::{StorageError, StorageResult};
use super::schema::ensure_schema;
use super::store::UserStore;

/// Location of the SQLite database file
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection scoped to the returned store
    pub fn connect(&self) -> StorageResult<UserStore> {
        trace!(path = %self.path.display(), "opening database connection");
        let conn = Connection::open(&self.path).map_err(StorageError::Open)?;
        Ok(UserStore::new(conn))
    }

    /// Create the `users` table if needed
    pub fn init_schema(&self) -> StorageResult<()> {
        let store = self.connect()?;
        ensure_schema(store.connection())
    }

    /// Run `op` against a freshly opened store on the blocking thread pool.
    ///
    /// The store is dropped, closing its connection, before this returns,
    /// whether `op` succeeded, failed, or panicked.
    pub async fn run<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&UserStore) -> StorageResult<T> + Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let store = db.connect()?;
            op(&store)
        })
        .await?
    }
}

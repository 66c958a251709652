//! Connection ownership. One connection, serialized behind a mutex;
//! every read and write goes through `with_reader` / `with_writer`.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use termsync_core::config::StorageConfig;
use termsync_core::errors::StorageError;

use crate::migrations;
use crate::queries::sqlite_err;

pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database, apply pragmas, and run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        Self::initialize(conn, Some(path.to_path_buf()), config)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        Self::initialize(conn, None, config)
    }

    fn initialize(conn: Connection, path: Option<PathBuf>, config: &StorageConfig) -> Result<Self, StorageError> {
        pragmas::apply_pragmas(&conn, config)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StorageError::sqlite("connection lock poisoned"))?;
        f(&conn)
    }

    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StorageError::sqlite("connection lock poisoned"))?;
        f(&conn)
    }
}

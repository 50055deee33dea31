//! Single-slot session store backed by an SQLite file.
//!
//! The file holds one table with one blob column and at most one row. Every
//! operation opens its own connection, does its work inside a transaction,
//! and closes the connection again, so any number of short-lived processes
//! can share the file with SQLite's locking as the only coordination.

use std::path::Path;

#[cfg(feature = "sqlite")]
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use tracing::{debug, error};

use crate::config::SessionStoreConfig;
use crate::error::{Error, Result};
use crate::handle::SessionHandle;

#[cfg(feature = "sqlite")]
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS session (value BLOB)";

/// Durable cache holding zero or one serialized session.
///
/// [`save`](Self::save), [`get`](Self::get) and [`delete`](Self::delete)
/// never fail outward: a broken cache costs a handshake, nothing more.
/// Failures are logged at error level and replaced by a safe default.
/// Use the `try_*` variants to observe the failure instead.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: SessionStoreConfig,
}

impl SessionStore {
    /// Create a store for the given configuration. Nothing is opened yet.
    pub fn new(config: SessionStoreConfig) -> Self {
        Self { config }
    }

    /// Store at the default location under the user's home directory.
    pub fn open_default() -> Self {
        Self::new(SessionStoreConfig::default())
    }

    /// A stateless store: saves are dropped and every get is a fresh session.
    pub fn unavailable() -> Self {
        Self::new(SessionStoreConfig::default().disabled())
    }

    /// Get the store configuration.
    pub fn config(&self) -> &SessionStoreConfig {
        &self.config
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Whether sessions are actually persisted.
    pub fn is_available(&self) -> bool {
        cfg!(feature = "sqlite") && self.config.enabled
    }

    /// Replace the cached session with `session`.
    pub fn save<H: SessionHandle>(&self, session: &H) {
        if let Err(e) = self.try_save(session) {
            report(self.path(), "save", &e);
        }
    }

    /// Recover the cached session, or a fresh one if nothing usable is stored.
    ///
    /// Missing rows, undecodable blobs and storage failures all yield
    /// `H::default()`. The stored row is left as it was.
    pub fn get<H: SessionHandle>(&self) -> H {
        match self.try_load() {
            Ok(Some(session)) => session,
            Ok(None) => H::default(),
            Err(e) => {
                report(self.path(), "get", &e);
                H::default()
            }
        }
    }

    /// Remove the cached session. Succeeds on an already empty store.
    pub fn delete(&self) {
        if let Err(e) = self.try_delete() {
            report(self.path(), "delete", &e);
        }
    }

    /// Fallible form of [`save`](Self::save).
    pub fn try_save<H: SessionHandle>(&self, session: &H) -> Result<()> {
        self.ensure_available()?;
        let blob = session.to_bytes()?;
        replace_row(&self.config, &blob)?;
        debug!(path = %self.path().display(), bytes = blob.len(), "Session saved");
        Ok(())
    }

    /// Fallible form of [`get`](Self::get). `Ok(None)` means the store is empty.
    pub fn try_load<H: SessionHandle>(&self) -> Result<Option<H>> {
        self.ensure_available()?;
        match read_row(&self.config)? {
            Some(blob) => {
                let session = H::from_bytes(&blob)?;
                debug!(path = %self.path().display(), bytes = blob.len(), "Session restored");
                Ok(Some(session))
            }
            None => {
                debug!(path = %self.path().display(), "No cached session");
                Ok(None)
            }
        }
    }

    /// Fallible form of [`delete`](Self::delete).
    pub fn try_delete(&self) -> Result<()> {
        self.ensure_available()?;
        clear_rows(&self.config)?;
        debug!(path = %self.path().display(), "Session cache cleared");
        Ok(())
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::Unavailable)
        }
    }
}

/// Single sink for every swallowed failure.
fn report(path: &Path, operation: &str, err: &Error) {
    if matches!(err, Error::Unavailable) {
        debug!(operation = %operation, "Session storage unavailable, running without cache");
        return;
    }
    error!(
        operation = %operation,
        path = %path.display(),
        error = ?err,
        "Session cache operation failed"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite backend
// ─────────────────────────────────────────────────────────────────────────────

/// Open the store file, creating it and the table when absent.
#[cfg(feature = "sqlite")]
fn connect(config: &SessionStoreConfig) -> Result<Connection> {
    let path = config.path.as_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    conn.busy_timeout(config.busy_timeout())?;
    conn.execute_batch(CREATE_TABLE)?;
    Ok(conn)
}

#[cfg(feature = "sqlite")]
fn close(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| Error::Close(e))
}

#[cfg(feature = "sqlite")]
fn replace_row(config: &SessionStoreConfig, blob: &[u8]) -> Result<()> {
    let mut conn = connect(config)?;
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM session", [])?;
    tx.execute("INSERT INTO session (value) VALUES (?1)", params![blob])?;
    tx.commit()?;
    close(conn)
}

#[cfg(feature = "sqlite")]
fn read_row(config: &SessionStoreConfig) -> Result<Option<Vec<u8>>> {
    let mut conn = connect(config)?;
    let row = select_row(&mut conn);

    // A failed close does not invalidate what was read.
    if let Err(e) = close(conn) {
        report(&config.path, "close", &e);
    }
    row
}

/// Read under a write lock so a concurrent replace is seen whole or not at all.
#[cfg(feature = "sqlite")]
fn select_row(conn: &mut Connection) -> Result<Option<Vec<u8>>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let blob = tx
        .query_row("SELECT value FROM session LIMIT 1", [], |row| {
            row.get::<_, Vec<u8>>(0)
        })
        .optional()?;
    tx.rollback()?;
    Ok(blob)
}

#[cfg(feature = "sqlite")]
fn clear_rows(config: &SessionStoreConfig) -> Result<()> {
    let mut conn = connect(config)?;
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM session", [])?;
    tx.commit()?;
    close(conn)
}

// ─────────────────────────────────────────────────────────────────────────────
// Stubs when the sqlite feature is disabled
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
fn replace_row(_config: &SessionStoreConfig, _blob: &[u8]) -> Result<()> {
    Err(Error::Unavailable)
}

#[cfg(not(feature = "sqlite"))]
fn read_row(_config: &SessionStoreConfig) -> Result<Option<Vec<u8>>> {
    Err(Error::Unavailable)
}

#[cfg(not(feature = "sqlite"))]
fn clear_rows(_config: &SessionStoreConfig) -> Result<()> {
    Err(Error::Unavailable)
}

//! Error types for session store operations.

/// Error type for session store operations.
///
/// None of these ever escape [`SessionStore::save`](crate::SessionStore::save),
/// [`SessionStore::get`](crate::SessionStore::get) or
/// [`SessionStore::delete`](crate::SessionStore::delete); they surface only
/// through the `try_*` variants and the error log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The embedded storage engine is compiled out or disabled by config.
    #[error("Session storage engine unavailable")]
    Unavailable,

    /// The store file could not be opened or created.
    #[cfg(feature = "sqlite")]
    #[error("Failed to open session store at {path:?}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Filesystem error while preparing the store location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A statement or transaction failed (locked, disk full, bad schema).
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The session handle could not be serialized.
    #[error("Failed to encode session: {0}")]
    Encode(String),

    /// The stored blob is not a valid serialized session.
    #[error("Failed to decode session: {0}")]
    Decode(String),

    /// Closing the connection failed after the work was done.
    #[cfg(feature = "sqlite")]
    #[error("Failed to close session store: {0}")]
    Close(#[source] rusqlite::Error),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, Error>;

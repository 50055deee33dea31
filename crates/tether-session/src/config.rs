//! Configuration for the session store.
//!
//! # Configuration
//!
//! ```toml
//! [session_cache]
//! path = "/home/me/.tether.db"
//! busy_timeout_ms = 5000
//! enabled = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the store, placed directly under the user's home directory.
pub const DEFAULT_DB_FILE: &str = ".tether.db";

/// How long a connection retries while another process holds the lock.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configuration for [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStoreConfig {
    /// Location of the store file. Every cooperating process must agree on it.
    /// Default: `~/.tether.db`
    pub path: PathBuf,

    /// Lock wait before an operation gives up, in milliseconds.
    /// Default: 5000
    pub busy_timeout_ms: u64,

    /// When false the store runs stateless, as if the engine were missing.
    /// Default: true
    pub enabled: bool,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            enabled: true,
        }
    }
}

impl SessionStoreConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the store at a specific file.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Set how long to wait on a locked store.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Run without persistence.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The busy timeout as a [`Duration`].
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// `<home>/.tether.db`, or `./.tether.db` when no home directory is known.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DB_FILE)
}

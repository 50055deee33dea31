//! Persist one client session across short-lived processes.
//!
//! Each heartbeat process is short-lived, so without help every one of them
//! pays for a full TLS handshake. This crate keeps the last session in a
//! single-row SQLite table so the next process can pick it up:
//! - One durable slot, replaced wholesale on every save
//! - Safe for uncoordinated access from many processes
//! - Never fails outward; a broken cache degrades to a fresh session
//!
//! # Example
//!
//! ```rust,no_run
//! use tether_session::{ClientSession, SessionStore};
//!
//! let store = SessionStore::open_default();
//!
//! let mut session: ClientSession = store.get();
//! session.set_cookie("sid", "abc123");
//! store.save(&session);
//! ```
//!
//! Building without the default `sqlite` feature, or setting
//! `enabled = false`, turns the store into a stateless stand-in.

mod client;
mod config;
mod error;
mod handle;
mod store;

pub use client::{ClientSession, TlsResumption};
pub use config::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_FILE, SessionStoreConfig, default_db_path};
pub use error::{Error, Result};
pub use handle::SessionHandle;
pub use store::SessionStore;

//! A concrete HTTPS client session that can ride in the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::handle::SessionHandle;

/// TLS session-resumption state negotiated with one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsResumption {
    /// Opaque ticket issued by the server.
    pub ticket: Vec<u8>,

    /// When the server handed out the ticket.
    pub issued_at: DateTime<Utc>,

    /// Ticket lifetime hint from the server, in seconds.
    pub lifetime_secs: u32,
}

impl TlsResumption {
    /// Whether the ticket can still be offered at `now`.
    ///
    /// An expiry past the representable range counts as expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.issued_at
            .checked_add_signed(Duration::seconds(i64::from(self.lifetime_secs)))
            .is_some_and(|expiry| now < expiry)
    }
}

/// Client-side state worth keeping between heartbeat processes.
///
/// Holds the default request headers, cookies set by the server, and one
/// resumption ticket per host so the next process can skip the full TLS
/// handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSession {
    /// Headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Cookies by name.
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,

    /// Resumption state keyed by host name.
    #[serde(default)]
    pub resumption: BTreeMap<String, TlsResumption>,
}

impl ClientSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Store or replace a cookie.
    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Look up a cookie value.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Record a resumption ticket for `host`, replacing any previous one.
    pub fn remember_ticket(&mut self, host: impl Into<String>, ticket: Vec<u8>, lifetime_secs: u32) {
        self.resumption.insert(
            host.into(),
            TlsResumption {
                ticket,
                issued_at: Utc::now(),
                lifetime_secs,
            },
        );
    }

    /// Resumption state for `host`, if it has not expired by `now`.
    pub fn resumption_for(&self, host: &str, now: DateTime<Utc>) -> Option<&TlsResumption> {
        self.resumption.get(host).filter(|r| r.is_valid_at(now))
    }

    /// Drop everything known about `host`'s TLS session.
    pub fn forget_host(&mut self, host: &str) -> Option<TlsResumption> {
        self.resumption.remove(host)
    }

    /// True when the session carries no state at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.cookies.is_empty() && self.resumption.is_empty()
    }
}

impl SessionHandle for ClientSession {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Encode(e.to_string()))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

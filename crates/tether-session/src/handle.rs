//! The capability a value needs in order to be cached by [`SessionStore`].
//!
//! The store never looks inside a session. It only needs to turn one into
//! bytes, turn bytes back into one, and build an empty one when nothing
//! usable is cached.
//!
//! [`SessionStore`]: crate::SessionStore

use crate::error::Result;

/// A reusable network session that can be persisted between processes.
///
/// `Default` doubles as the "fresh session" constructor: it must produce a
/// valid handle with no prior connection state.
pub trait SessionHandle: Default + Sized {
    /// Serialize the session into a self-describing blob.
    ///
    /// Return [`Error::Encode`](crate::Error::Encode) if the session holds
    /// state that cannot be captured.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Rebuild a session from a blob written by [`to_bytes`](Self::to_bytes).
    ///
    /// Return [`Error::Decode`](crate::Error::Decode) for anything that is
    /// not a valid blob; the store treats that the same as an empty cache.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Raw bytes are their own serialized form.
impl SessionHandle for Vec<u8> {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

//! Session store port - persistence for in-progress funnel sessions.
//!
//! Storage is scoped to one store instance (no cross-device sharing), so at
//! most one funnel instance per business id touches a given store and no
//! concurrency control is required. Writes are last-write-wins.

use async_trait::async_trait;

use crate::domain::foundation::BusinessId;
use crate::domain::funnel::SessionRecord;

/// Key prefix namespacing persisted session records.
pub const SESSION_KEY_PREFIX: &str = "rmp_review_session_";

/// Errors that can occur during session store operations.
///
/// Callers treat these as recoverable: a failed write is logged and
/// swallowed, a failed read is treated as an absent session. Store errors
/// never surface to the reviewer.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session record: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and recovering funnel sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrites the record for this business id.
    async fn put(&self, id: &BusinessId, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Reads the record for this business id.
    ///
    /// Returns `Ok(None)` when the record is missing, malformed or older
    /// than the store's expiry window; malformed and expired records are
    /// discarded, never raised as errors.
    async fn get(&self, id: &BusinessId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Deletes the record for this business id. Idempotent; deleting an
    /// absent record is a no-op.
    async fn delete(&self, id: &BusinessId) -> Result<(), SessionStoreError>;
}

/// Builds the namespaced storage key for a business id.
pub fn session_key(id: &BusinessId) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, id)
}

//! In-Memory Session Store Adapter
//!
//! Holds session records in process memory, keyed by the namespaced session
//! key. The default store for a single-instance deployment; also what tests
//! use.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{BusinessId, Timestamp};
use crate::domain::funnel::SessionRecord;
use crate::ports::{session_key, SessionStore, SessionStoreError};

/// In-memory storage for funnel session records.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
    max_age: Duration,
}

impl InMemorySessionStore {
    /// Create a new in-memory store with the given expiry window.
    pub fn new(max_age: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            max_age,
        }
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, id: &BusinessId, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let mut records = self.records.write().await;
        records.insert(session_key(id), record.clone());
        Ok(())
    }

    async fn get(&self, id: &BusinessId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let key = session_key(id);
        let now = Timestamp::now();

        let record = {
            let records = self.records.read().await;
            records.get(&key).cloned()
        };

        match record {
            Some(record) if record.is_expired(&now, self.max_age) => {
                // Expired records are discarded, not returned.
                self.records.write().await.remove(&key);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn delete(&self, id: &BusinessId) -> Result<(), SessionStoreError> {
        self.records.write().await.remove(&session_key(id));
        Ok(())
    }
}

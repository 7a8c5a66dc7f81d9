//! File-based Session Store Adapter
//!
//! Stores session records as JSON files on disk, one per business id, so
//! in-progress sessions survive a dev-server restart. Malformed files are
//! treated as absent rather than raised.

use async_trait::async_trait;
use chrono::Duration;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::domain::foundation::{BusinessId, Timestamp};
use crate::domain::funnel::SessionRecord;
use crate::ports::{session_key, SessionStore, SessionStoreError};

/// File-based storage for funnel session records.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    max_age: Duration,
}

impl FileSessionStore {
    /// Create a new file store with a base directory and expiry window.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions", Duration::minutes(30));
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, max_age: Duration) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            max_age,
        }
    }

    /// Get the record file path for a business
    fn record_path(&self, id: &BusinessId) -> PathBuf {
        self.base_path.join(format!("{}.json", session_key(id)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn put(&self, id: &BusinessId, record: &SessionRecord) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        let json = serde_json::to_string(record)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.record_path(id), json)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &BusinessId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let path = self.record_path(id);

        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let record: SessionRecord = match serde_json::from_str(&json) {
            Ok(record) => record,
            Err(e) => {
                // Corrupt record: recover locally, never surface.
                warn!(business_id = %id, error = %e, "session record corrupt, treating as absent");
                return Ok(None);
            }
        };

        if record.is_expired(&Timestamp::now(), self.max_age) {
            let _ = fs::remove_file(&path).await;
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn delete(&self, id: &BusinessId) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.record_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }
}

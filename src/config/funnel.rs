//! Funnel behavior configuration

use chrono::Duration as ChronoDuration;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Funnel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FunnelConfig {
    /// Age after which a persisted session is treated as absent, in seconds
    #[serde(default = "default_session_max_age")]
    pub session_max_age_secs: u64,

    /// Simulated backend-write latency on submit, in milliseconds
    #[serde(default = "default_submit_latency")]
    pub submit_latency_ms: u64,

    /// Directory for file-backed session records; in-memory when unset
    pub session_dir: Option<String>,
}

impl FunnelConfig {
    /// Session expiry window as a chrono Duration
    pub fn session_max_age(&self) -> ChronoDuration {
        ChronoDuration::seconds(self.session_max_age_secs as i64)
    }

    /// Submit latency as a std Duration
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    /// Validate funnel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_max_age_secs == 0 {
            return Err(ValidationError::InvalidSessionMaxAge);
        }
        if self.submit_latency_ms > 10_000 {
            return Err(ValidationError::InvalidSubmitLatency);
        }
        if self.session_dir.as_ref().is_some_and(|d| d.is_empty()) {
            return Err(ValidationError::InvalidSessionDir);
        }
        Ok(())
    }
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            session_max_age_secs: default_session_max_age(),
            submit_latency_ms: default_submit_latency(),
            session_dir: None,
        }
    }
}

// 30 minutes, matching the recovery window of the original funnel.
fn default_session_max_age() -> u64 {
    30 * 60
}

fn default_submit_latency() -> u64 {
    1500
}

//! AI provider configuration (Gemini)

use serde::Deserialize;
use std::time::Duration;

/// Gemini API configuration
///
/// The key is optional: without one the service boots with the mock AI
/// client and every AI surface renders its degraded state.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Base URL for the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Low-latency model for review reply drafts
    #[serde(default = "default_draft_model")]
    pub draft_model: String,

    /// Reasoning model for the strategic insight digest
    #[serde(default = "default_insights_model")]
    pub insights_model: String,

    /// Search-grounded model for market trends
    #[serde(default = "default_trends_model")]
    pub trends_model: String,

    /// Maps-grounded model for local competition lookups
    #[serde(default = "default_local_model")]
    pub local_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            base_url: default_base_url(),
            draft_model: default_draft_model(),
            insights_model: default_insights_model(),
            trends_model: default_trends_model(),
            local_model: default_local_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_draft_model() -> String {
    "gemini-flash-lite-latest".to_string()
}

fn default_insights_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_trends_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_local_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

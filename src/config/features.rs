//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Enable the market/local intelligence panels
    #[serde(default = "default_enable_market_intel")]
    pub enable_market_intel: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_market_intel: default_enable_market_intel(),
            verbose_errors: false,
        }
    }
}

fn default_enable_market_intel() -> bool {
    true
}

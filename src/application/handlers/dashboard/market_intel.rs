//! Market intelligence handlers - grounded trend and local lookups.

use std::sync::Arc;

use crate::ports::{AiOrchestrator, GroundedAnswer};

/// Degraded-state text when the intelligence panels are switched off.
const INTEL_DISABLED: &str = "Market intelligence is disabled for this deployment.";

/// Query for industry trends.
#[derive(Debug, Clone)]
pub struct MarketTrendsQuery {
    pub niche: String,
}

/// Query for local competition.
#[derive(Debug, Clone)]
pub struct LocalInsightsQuery {
    pub business_type: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Handler for the market/local intelligence panels.
///
/// Grounded lookups never error: a disabled feature or a dead upstream both
/// come back as `success=false` answers the panel renders as a degraded
/// state.
pub struct MarketIntelHandler {
    ai: Arc<dyn AiOrchestrator>,
    enabled: bool,
}

impl MarketIntelHandler {
    pub fn new(ai: Arc<dyn AiOrchestrator>, enabled: bool) -> Self {
        Self { ai, enabled }
    }

    pub async fn market_trends(&self, query: MarketTrendsQuery) -> GroundedAnswer {
        if !self.enabled {
            return GroundedAnswer::degraded(INTEL_DISABLED);
        }
        self.ai.market_trends(&query.niche).await
    }

    pub async fn local_insights(&self, query: LocalInsightsQuery) -> GroundedAnswer {
        if !self.enabled {
            return GroundedAnswer::degraded(INTEL_DISABLED);
        }
        self.ai
            .local_insights(&query.business_type, query.lat, query.lng)
            .await
    }
}

//! StrategicInsightsHandler - improvement plan over a business's reviews.

use std::sync::Arc;

use crate::domain::foundation::BusinessId;
use crate::ports::{AiOrchestrator, ReviewDigest, ReviewInbox, TenantResolver};

use super::DashboardHandlerError;

/// Command to generate the improvement plan.
#[derive(Debug, Clone)]
pub struct StrategicInsightsCommand {
    pub business_id: BusinessId,
}

/// The generated plan, split into renderable points.
#[derive(Debug, Clone)]
pub struct StrategicInsightsResult {
    pub text: String,
    /// Non-empty lines of the plan, for numbered-list rendering.
    pub points: Vec<String>,
    pub degraded: bool,
}

/// Handler producing the strategic insight digest.
pub struct StrategicInsightsHandler {
    resolver: Arc<dyn TenantResolver>,
    inbox: Arc<dyn ReviewInbox>,
    ai: Arc<dyn AiOrchestrator>,
}

impl StrategicInsightsHandler {
    pub fn new(
        resolver: Arc<dyn TenantResolver>,
        inbox: Arc<dyn ReviewInbox>,
        ai: Arc<dyn AiOrchestrator>,
    ) -> Self {
        Self { resolver, inbox, ai }
    }

    pub async fn handle(
        &self,
        cmd: StrategicInsightsCommand,
    ) -> Result<StrategicInsightsResult, DashboardHandlerError> {
        let business = self.resolver.resolve(&cmd.business_id).await?;
        let reviews = self.inbox.list_for_business(&cmd.business_id).await?;

        let digests: Vec<ReviewDigest> = reviews
            .iter()
            .map(|r| ReviewDigest {
                rating: r.rating.value(),
                text: r.text.clone(),
            })
            .collect();

        let insights = self.ai.strategic_insights(&digests, &business.name).await;

        let text = insights.text().to_string();
        let points = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Ok(StrategicInsightsResult {
            text,
            points,
            degraded: insights.is_degraded(),
        })
    }
}

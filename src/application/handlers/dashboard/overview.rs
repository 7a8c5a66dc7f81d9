//! GetOverviewHandler - KPI aggregates for the operator console.

use std::sync::Arc;

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::BusinessId;
use crate::domain::review::{Review, Visibility};
use crate::ports::{ReviewInbox, TenantResolver};

use super::DashboardHandlerError;

/// Query for the dashboard overview.
#[derive(Debug, Clone)]
pub struct GetOverviewQuery {
    pub business_id: BusinessId,
}

/// Aggregated view over the business's captured reviews.
#[derive(Debug, Clone)]
pub struct OverviewResult {
    pub business: BusinessProfile,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub private_reviews: usize,
    pub needs_attention: usize,
    /// Query string for the shareable funnel link (and its QR payload).
    pub share_query: String,
}

/// Handler computing the overview.
pub struct GetOverviewHandler {
    resolver: Arc<dyn TenantResolver>,
    inbox: Arc<dyn ReviewInbox>,
}

impl GetOverviewHandler {
    pub fn new(resolver: Arc<dyn TenantResolver>, inbox: Arc<dyn ReviewInbox>) -> Self {
        Self { resolver, inbox }
    }

    pub async fn handle(
        &self,
        query: GetOverviewQuery,
    ) -> Result<OverviewResult, DashboardHandlerError> {
        let business = self.resolver.resolve(&query.business_id).await?;
        let reviews = self.inbox.list_for_business(&query.business_id).await?;

        Ok(OverviewResult {
            share_query: format!("?biz={}", business.id),
            average_rating: average_rating(&reviews),
            total_reviews: reviews.len(),
            private_reviews: reviews
                .iter()
                .filter(|r| r.visibility == Visibility::Private)
                .count(),
            needs_attention: reviews.iter().filter(|r| r.needs_attention()).count(),
            business,
        })
    }
}

fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating.value() as u32).sum();
    sum as f64 / reviews.len() as f64
}

//! Dashboard command/query handlers.

mod draft_reply;
mod list_reviews;
mod market_intel;
mod overview;
mod strategic_insights;

pub use draft_reply::{DraftReplyCommand, DraftReplyHandler, DraftReplyResult};
pub use list_reviews::{ListReviewsHandler, ListReviewsQuery};
pub use market_intel::{LocalInsightsQuery, MarketIntelHandler, MarketTrendsQuery};
pub use overview::{GetOverviewHandler, GetOverviewQuery, OverviewResult};
pub use strategic_insights::{
    StrategicInsightsCommand, StrategicInsightsHandler, StrategicInsightsResult,
};

use crate::domain::foundation::{DomainError, ReviewId};
use crate::ports::ResolveError;

/// Errors surfaced by dashboard handlers.
#[derive(Debug, thiserror::Error)]
pub enum DashboardHandlerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Review '{0}' not found")]
    ReviewNotFound(ReviewId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

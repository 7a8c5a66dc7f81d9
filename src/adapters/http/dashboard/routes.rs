//! HTTP routes for dashboard endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    draft_reply, get_overview, list_reviews, local_insights, market_trends, strategic_insights,
    DashboardHandlers,
};

/// Creates the dashboard router with all endpoints.
pub fn dashboard_routes(handlers: DashboardHandlers) -> Router {
    Router::new()
        .route("/:biz/overview", get(get_overview))
        .route("/:biz/reviews", get(list_reviews))
        .route("/:biz/reviews/:review_id/draft", post(draft_reply))
        .route("/:biz/insights", post(strategic_insights))
        .route("/:biz/market-trends", get(market_trends))
        .route("/:biz/local-insights", get(local_insights))
        .with_state(handlers)
}

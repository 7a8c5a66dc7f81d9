//! HTTP adapters - REST API implementations.
//!
//! Each surface has its own HTTP adapter for endpoint exposure.

pub mod dashboard;
pub mod error;
pub mod funnel;

// Re-export key types for convenience
pub use dashboard::{dashboard_routes, DashboardHandlers};
pub use funnel::{funnel_routes, FunnelHandlers};

use axum::Router;

/// Assembles the full API router: `/api/funnel/*` and `/api/dashboard/*`.
pub fn api_router(funnel: FunnelHandlers, dashboard: DashboardHandlers) -> Router {
    Router::new()
        .nest("/api/funnel", funnel_routes(funnel))
        .nest("/api/dashboard", dashboard_routes(dashboard))
}

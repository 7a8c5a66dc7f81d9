//! HTTP routes for funnel endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{apply_event, get_funnel_state, start_funnel, FunnelHandlers};

/// Creates the funnel router with all endpoints.
pub fn funnel_routes(handlers: FunnelHandlers) -> Router {
    Router::new()
        .route("/start", post(start_funnel))
        .route("/:biz/state", get(get_funnel_state))
        .route("/:biz/event", post(apply_event))
        .with_state(handlers)
}

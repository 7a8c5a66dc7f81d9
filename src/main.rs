//! ReviewMaster service entry point.
//!
//! Loads configuration, wires adapters into the application handlers, and
//! serves the funnel and dashboard APIs.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reviewmaster::adapters::ai::{GeminiClient, GeminiConfig, MockAiClient};
use reviewmaster::adapters::http::{api_router, DashboardHandlers, FunnelHandlers};
use reviewmaster::adapters::registry::{SeededReviewInbox, StaticRegistry};
use reviewmaster::adapters::storage::{FileSessionStore, InMemorySessionStore};
use reviewmaster::application::handlers::dashboard::{
    DraftReplyHandler, GetOverviewHandler, ListReviewsHandler, MarketIntelHandler,
    StrategicInsightsHandler,
};
use reviewmaster::application::handlers::funnel::{
    ApplyEventHandler, GetFunnelStateHandler, StartFunnelHandler,
};
use reviewmaster::config::AppConfig;
use reviewmaster::ports::{AiOrchestrator, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.server.log_level.clone()))
        .init();

    // Session store: file-backed when a directory is configured, in-memory
    // otherwise.
    let store: Arc<dyn SessionStore> = match &config.funnel.session_dir {
        Some(dir) => {
            info!(dir = %dir, "using file-backed session store");
            Arc::new(FileSessionStore::new(dir, config.funnel.session_max_age()))
        }
        None => Arc::new(InMemorySessionStore::new(config.funnel.session_max_age())),
    };

    // AI client: Gemini when a key is configured, mock (degraded) otherwise.
    let ai: Arc<dyn AiOrchestrator> = match &config.ai.gemini_api_key {
        Some(key) if !key.is_empty() => Arc::new(GeminiClient::new(
            GeminiConfig::from_app_config(&config.ai, key.clone()),
        )),
        _ => {
            warn!("no Gemini API key configured; AI surfaces will degrade");
            Arc::new(MockAiClient::new())
        }
    };

    let resolver = Arc::new(StaticRegistry::new());
    let inbox = Arc::new(SeededReviewInbox::new());

    let funnel_handlers = FunnelHandlers::new(
        Arc::new(StartFunnelHandler::new(resolver.clone(), store.clone())),
        Arc::new(ApplyEventHandler::new(
            resolver.clone(),
            store.clone(),
            config.funnel.submit_latency(),
        )),
        Arc::new(GetFunnelStateHandler::new(resolver.clone(), store.clone())),
    );

    let dashboard_handlers = DashboardHandlers::new(
        Arc::new(GetOverviewHandler::new(resolver.clone(), inbox.clone())),
        Arc::new(ListReviewsHandler::new(resolver.clone(), inbox.clone())),
        Arc::new(DraftReplyHandler::new(
            resolver.clone(),
            inbox.clone(),
            ai.clone(),
        )),
        Arc::new(StrategicInsightsHandler::new(resolver, inbox, ai.clone())),
        Arc::new(MarketIntelHandler::new(
            ai,
            config.features.enable_market_intel,
        )),
    );

    let cors = build_cors_layer(&config.server.cors_origins_list());

    let app = api_router(funnel_handlers, dashboard_handlers).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            ))),
    );

    let addr = config.server.socket_addr();
    info!(%addr, "reviewmaster listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

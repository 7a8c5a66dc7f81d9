//! Mock AI Client for testing and keyless development.
//!
//! Configurable to return canned responses, simulate latency, or degrade
//! every operation the way a dead upstream would.
//!
//! # Example
//!
//! ```ignore
//! let client = MockAiClient::new()
//!     .with_draft("Thanks so much, Sarah!")
//!     .with_delay(Duration::from_millis(50));
//!
//! let reply = client.draft_reply("Great!", Rating::Five, "Merlin").await;
//! assert_eq!(reply.text(), "Thanks so much, Sarah!");
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Rating;
use crate::ports::{
    AiOrchestrator, AiText, GroundedAnswer, GroundingSource, ReviewDigest, DRAFT_FALLBACK,
    INSIGHTS_FALLBACK, LOCAL_DEGRADED, TRENDS_DEGRADED,
};

/// Mock AI orchestrator.
///
/// Without canned responses every operation degrades, which is also the
/// behavior the service boots with when no API key is configured.
#[derive(Debug, Clone, Default)]
pub struct MockAiClient {
    draft: Option<String>,
    insights: Option<String>,
    trends: Option<GroundedAnswer>,
    local: Option<GroundedAnswer>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockAiClient {
    /// Creates a mock that degrades every operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canned draft reply.
    pub fn with_draft(mut self, text: impl Into<String>) -> Self {
        self.draft = Some(text.into());
        self
    }

    /// Sets the canned insight digest.
    pub fn with_insights(mut self, text: impl Into<String>) -> Self {
        self.insights = Some(text.into());
        self
    }

    /// Sets the canned market trends answer.
    pub fn with_trends(mut self, text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        self.trends = Some(GroundedAnswer::ok(text, sources));
        self
    }

    /// Sets the canned local insights answer.
    pub fn with_local(mut self, text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        self.local = Some(GroundedAnswer::ok(text, sources));
        self
    }

    /// Simulates upstream latency on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of operations invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
    }
}

#[async_trait]
impl AiOrchestrator for MockAiClient {
    async fn draft_reply(
        &self,
        _review_text: &str,
        _rating: Rating,
        _business_name: &str,
    ) -> AiText {
        self.tick().await;
        match &self.draft {
            Some(text) => AiText::Generated(text.clone()),
            None => AiText::Degraded {
                text: DRAFT_FALLBACK.to_string(),
                reason: "mock: no canned draft".to_string(),
            },
        }
    }

    async fn strategic_insights(
        &self,
        _reviews: &[ReviewDigest],
        _business_name: &str,
    ) -> AiText {
        self.tick().await;
        match &self.insights {
            Some(text) => AiText::Generated(text.clone()),
            None => AiText::Degraded {
                text: INSIGHTS_FALLBACK.to_string(),
                reason: "mock: no canned insights".to_string(),
            },
        }
    }

    async fn market_trends(&self, _niche: &str) -> GroundedAnswer {
        self.tick().await;
        self.trends
            .clone()
            .unwrap_or_else(|| GroundedAnswer::degraded(TRENDS_DEGRADED))
    }

    async fn local_insights(
        &self,
        _business_type: &str,
        _lat: Option<f64>,
        _lng: Option<f64>,
    ) -> GroundedAnswer {
        self.tick().await;
        self.local
            .clone()
            .unwrap_or_else(|| GroundedAnswer::degraded(LOCAL_DEGRADED))
    }
}

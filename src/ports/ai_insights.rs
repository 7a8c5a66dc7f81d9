//! AI orchestration port - draft replies and market/competitive insight
//! lookups.
//!
//! Four independent one-shot operations with no retry and no shared state
//! between calls. None of them fails outward: text generation degrades to a
//! designated fallback string, and grounded lookups carry an explicit
//! success flag so the rendering layer can distinguish "no data" from
//! "service unavailable". The funnel and dashboard stay interactive
//! regardless of collaborator health.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Rating;

/// Fallback reply when draft generation fails.
pub const DRAFT_FALLBACK: &str = "Thank you for your valuable feedback.";

/// Fallback text when the strategic insight digest fails.
pub const INSIGHTS_FALLBACK: &str = "Unable to generate strategic insights at this time.";

/// Degraded-state text for the market trends panel.
pub const TRENDS_DEGRADED: &str =
    "Our global trend monitors are currently undergoing maintenance. Please try again in a few moments.";

/// Degraded-state text for the local insights panel.
pub const LOCAL_DEGRADED: &str =
    "The local mapping shard is temporarily unresponsive. We're working to restore the link.";

/// Coordinates substituted when the caller has no location fix.
pub const FALLBACK_COORDS: (f64, f64) = (37.422, -122.084);

/// Result of a text-generation operation.
///
/// `Degraded` carries the fallback text plus the reason the generation
/// failed, preserving the distinction for logging while the rendering
/// contract stays a plain string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiText {
    Generated(String),
    Degraded { text: String, reason: String },
}

impl AiText {
    /// The text to render, regardless of provenance.
    pub fn text(&self) -> &str {
        match self {
            AiText::Generated(text) => text,
            AiText::Degraded { text, .. } => text,
        }
    }

    /// True when the text is a fallback substitute.
    pub fn is_degraded(&self) -> bool {
        matches!(self, AiText::Degraded { .. })
    }
}

/// One source backing a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// A grounded search-style answer with an explicit success flag.
///
/// `success=false` means the service was unavailable; the consumer renders
/// a distinct degraded state rather than treating the text as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    pub success: bool,
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

impl GroundedAnswer {
    /// A successful answer.
    pub fn ok(text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        Self {
            success: true,
            text: text.into(),
            sources,
        }
    }

    /// A degraded answer carrying the designated placeholder text.
    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Compact review context handed to the insight digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDigest {
    pub rating: u8,
    pub text: String,
}

/// Port for the AI orchestration collaborator.
#[async_trait]
pub trait AiOrchestrator: Send + Sync {
    /// Drafts a reply to one review. Never fails outward.
    async fn draft_reply(&self, review_text: &str, rating: Rating, business_name: &str) -> AiText;

    /// Produces a multi-line numbered improvement plan over the given
    /// reviews; consumers split on line breaks to render the list.
    async fn strategic_insights(&self, reviews: &[ReviewDigest], business_name: &str) -> AiText;

    /// Looks up customer-service trends for an industry niche.
    async fn market_trends(&self, niche: &str) -> GroundedAnswer;

    /// Looks up top-rated local competitors. When coordinates are absent a
    /// fixed fallback pair is substituted rather than omitting location
    /// context.
    async fn local_insights(
        &self,
        business_type: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> GroundedAnswer;
}

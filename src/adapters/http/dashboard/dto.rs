//! Request/response DTOs for dashboard endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::funnel::dto::BusinessDto;
use crate::application::handlers::dashboard::{OverviewResult, StrategicInsightsResult};
use crate::domain::review::{Review, Visibility};
use crate::domain::routing::Platform;
use crate::ports::GroundedAnswer;

/// Default niche for the intelligence panels, matching the console's
/// pre-filled search box.
pub const DEFAULT_NICHE: &str = "Hospitality and Fine Dining";

/// Query params for the inbox listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListReviewsParams {
    pub visibility: Option<Visibility>,
    pub platform: Option<Platform>,
}

/// Query params for the market trends panel.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendsParams {
    pub niche: Option<String>,
}

/// Query params for the local insights panel.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalParams {
    pub business_type: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Wire shape of one inbox review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: String,
    pub reviewer_name: String,
    pub rating: u8,
    pub text: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_draft: Option<String>,
    pub resolved: bool,
}

impl From<&Review> for ReviewDto {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            reviewer_name: review.reviewer_name.clone(),
            rating: review.rating.value(),
            text: review.text.clone(),
            visibility: review.visibility,
            platform: review.platform,
            created_at: review.created_at.as_epoch_ms(),
            ai_draft: review.ai_draft.clone(),
            resolved: review.resolved,
        }
    }
}

/// Response for GET /api/dashboard/:biz/overview.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub business: BusinessDto,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub private_reviews: usize,
    pub needs_attention: usize,
    pub share_query: String,
}

impl From<OverviewResult> for OverviewResponse {
    fn from(result: OverviewResult) -> Self {
        Self {
            business: BusinessDto::from(&result.business),
            average_rating: result.average_rating,
            total_reviews: result.total_reviews,
            private_reviews: result.private_reviews,
            needs_attention: result.needs_attention,
            share_query: result.share_query,
        }
    }
}

/// Response for POST /api/dashboard/:biz/reviews/:id/draft.
#[derive(Debug, Clone, Serialize)]
pub struct DraftResponse {
    pub draft: String,
    pub degraded: bool,
}

/// Response for POST /api/dashboard/:biz/insights.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub text: String,
    pub points: Vec<String>,
    pub degraded: bool,
}

impl From<StrategicInsightsResult> for InsightsResponse {
    fn from(result: StrategicInsightsResult) -> Self {
        Self {
            text: result.text,
            points: result.points,
            degraded: result.degraded,
        }
    }
}

/// Response for the grounded intelligence panels. The `success` flag is the
/// wire contract: `false` renders the degraded state, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct GroundedAnswerResponse {
    pub success: bool,
    pub text: String,
    pub sources: Vec<SourceDto>,
}

/// One grounding source.
#[derive(Debug, Clone, Serialize)]
pub struct SourceDto {
    pub title: String,
    pub uri: String,
}

impl From<GroundedAnswer> for GroundedAnswerResponse {
    fn from(answer: GroundedAnswer) -> Self {
        Self {
            success: answer.success,
            text: answer.text,
            sources: answer
                .sources
                .into_iter()
                .map(|s| SourceDto {
                    title: s.title,
                    uri: s.uri,
                })
                .collect(),
        }
    }
}

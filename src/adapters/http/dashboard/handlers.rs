//! HTTP handlers for dashboard endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::dashboard::{
    DashboardHandlerError, DraftReplyCommand, DraftReplyHandler, GetOverviewHandler,
    GetOverviewQuery, ListReviewsHandler, ListReviewsQuery, LocalInsightsQuery, MarketIntelHandler,
    MarketTrendsQuery, StrategicInsightsCommand, StrategicInsightsHandler,
};
use crate::domain::foundation::{BusinessId, ErrorCode, ReviewId};
use crate::ports::ResolveError;

use super::dto::{
    DraftResponse, GroundedAnswerResponse, InsightsResponse, ListReviewsParams, LocalParams,
    OverviewResponse, ReviewDto, TrendsParams, DEFAULT_NICHE,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DashboardHandlers {
    overview_handler: Arc<GetOverviewHandler>,
    list_handler: Arc<ListReviewsHandler>,
    draft_handler: Arc<DraftReplyHandler>,
    insights_handler: Arc<StrategicInsightsHandler>,
    intel_handler: Arc<MarketIntelHandler>,
}

impl DashboardHandlers {
    pub fn new(
        overview_handler: Arc<GetOverviewHandler>,
        list_handler: Arc<ListReviewsHandler>,
        draft_handler: Arc<DraftReplyHandler>,
        insights_handler: Arc<StrategicInsightsHandler>,
        intel_handler: Arc<MarketIntelHandler>,
    ) -> Self {
        Self {
            overview_handler,
            list_handler,
            draft_handler,
            insights_handler,
            intel_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/dashboard/:biz/overview - KPI aggregates
pub async fn get_overview(
    State(handlers): State<DashboardHandlers>,
    Path(biz): Path<String>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .overview_handler
        .handle(GetOverviewQuery { business_id })
        .await
    {
        Ok(result) => {
            let response: OverviewResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dashboard_error(e),
    }
}

/// GET /api/dashboard/:biz/reviews - Inbox listing
pub async fn list_reviews(
    State(handlers): State<DashboardHandlers>,
    Path(biz): Path<String>,
    Query(params): Query<ListReviewsParams>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .list_handler
        .handle(ListReviewsQuery {
            business_id,
            visibility: params.visibility,
            platform: params.platform,
        })
        .await
    {
        Ok(reviews) => {
            let response: Vec<ReviewDto> = reviews.iter().map(ReviewDto::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dashboard_error(e),
    }
}

/// POST /api/dashboard/:biz/reviews/:review_id/draft - AI reply draft
pub async fn draft_reply(
    State(handlers): State<DashboardHandlers>,
    Path((biz, review_id)): Path<(String, String)>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let review_id = match review_id.parse::<ReviewId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid review ID")),
            )
                .into_response()
        }
    };

    match handlers
        .draft_handler
        .handle(DraftReplyCommand {
            business_id,
            review_id,
        })
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(DraftResponse {
                draft: result.draft,
                degraded: result.degraded,
            }),
        )
            .into_response(),
        Err(e) => handle_dashboard_error(e),
    }
}

/// POST /api/dashboard/:biz/insights - Strategic improvement plan
pub async fn strategic_insights(
    State(handlers): State<DashboardHandlers>,
    Path(biz): Path<String>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .insights_handler
        .handle(StrategicInsightsCommand { business_id })
        .await
    {
        Ok(result) => {
            let response: InsightsResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_dashboard_error(e),
    }
}

/// GET /api/dashboard/:biz/market-trends - Grounded trends lookup
pub async fn market_trends(
    State(handlers): State<DashboardHandlers>,
    Path(biz): Path<String>,
    Query(params): Query<TrendsParams>,
) -> Response {
    if let Err(response) = parse_business_id(&biz) {
        return response;
    }

    let answer = handlers
        .intel_handler
        .market_trends(MarketTrendsQuery {
            niche: params.niche.unwrap_or_else(|| DEFAULT_NICHE.to_string()),
        })
        .await;

    let response: GroundedAnswerResponse = answer.into();
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/dashboard/:biz/local-insights - Grounded local lookup
pub async fn local_insights(
    State(handlers): State<DashboardHandlers>,
    Path(biz): Path<String>,
    Query(params): Query<LocalParams>,
) -> Response {
    if let Err(response) = parse_business_id(&biz) {
        return response;
    }

    let answer = handlers
        .intel_handler
        .local_insights(LocalInsightsQuery {
            business_type: params
                .business_type
                .unwrap_or_else(|| DEFAULT_NICHE.to_string()),
            lat: params.lat,
            lng: params.lng,
        })
        .await;

    let response: GroundedAnswerResponse = answer.into();
    (StatusCode::OK, Json(response)).into_response()
}

fn parse_business_id(raw: &str) -> Result<BusinessId, Response> {
    BusinessId::sanitize(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_dashboard_error(error: DashboardHandlerError) -> Response {
    match error {
        DashboardHandlerError::Resolve(ResolveError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Business", id.as_str())),
        )
            .into_response(),
        DashboardHandlerError::ReviewNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Review", &id.to_string())),
        )
            .into_response(),
        DashboardHandlerError::Domain(e) if e.code == ErrorCode::ReviewNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Review", "unknown")),
        )
            .into_response(),
        DashboardHandlerError::Domain(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}

//! HTTP handlers for funnel endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::funnel::{
    ApplyEventCommand, ApplyEventHandler, FunnelHandlerError, GetFunnelStateHandler,
    GetFunnelStateQuery, StartFunnelCommand, StartFunnelHandler,
};
use crate::domain::foundation::BusinessId;
use crate::domain::funnel::FunnelError;
use crate::domain::routing::RoutingPolicy;
use crate::ports::ResolveError;

use super::dto::{
    ApplyEventRequest, BusinessDto, EventResponse, FunnelStateResponse, SessionDto,
    StartFunnelRequest, StateResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FunnelHandlers {
    start_handler: Arc<StartFunnelHandler>,
    apply_handler: Arc<ApplyEventHandler>,
    state_handler: Arc<GetFunnelStateHandler>,
}

impl FunnelHandlers {
    pub fn new(
        start_handler: Arc<StartFunnelHandler>,
        apply_handler: Arc<ApplyEventHandler>,
        state_handler: Arc<GetFunnelStateHandler>,
    ) -> Self {
        Self {
            start_handler,
            apply_handler,
            state_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/funnel/start - Resolve the tenant and recover any session
pub async fn start_funnel(
    State(handlers): State<FunnelHandlers>,
    Json(req): Json<StartFunnelRequest>,
) -> Response {
    let raw_id = match req.business_param() {
        Some(raw) => raw.to_string(),
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "Missing business identifier (biz, loc or id)",
                )),
            )
                .into_response()
        }
    };

    match handlers
        .start_handler
        .handle(StartFunnelCommand { raw_business_id: raw_id })
        .await
    {
        Ok(result) => {
            let privacy_shield = result
                .session
                .rating
                .map(RoutingPolicy::privacy_shield_active)
                .unwrap_or(false);
            let response = FunnelStateResponse {
                business: BusinessDto::from(&result.business),
                session: SessionDto::from(&result.session),
                recovered: result.recovered,
                privacy_shield,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_funnel_error(e),
    }
}

/// GET /api/funnel/:biz/state - Recovery view for a reloading client
pub async fn get_funnel_state(
    State(handlers): State<FunnelHandlers>,
    Path(biz): Path<String>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .state_handler
        .handle(GetFunnelStateQuery {
            business_id: business_id.clone(),
        })
        .await
    {
        Ok(session) => {
            let privacy_shield = session
                .rating
                .map(RoutingPolicy::privacy_shield_active)
                .unwrap_or(false);
            let response = StateResponse {
                session: SessionDto::from(&session),
                privacy_shield,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_funnel_error(e),
    }
}

/// POST /api/funnel/:biz/event - Apply one funnel event
pub async fn apply_event(
    State(handlers): State<FunnelHandlers>,
    Path(biz): Path<String>,
    Json(req): Json<ApplyEventRequest>,
) -> Response {
    let business_id = match parse_business_id(&biz) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let session = match req.session.into_domain(business_id.clone()) {
        Ok(session) => session,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let event = match req.event.into_domain() {
        Ok(event) => event,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers
        .apply_handler
        .handle(ApplyEventCommand {
            business_id,
            session,
            event,
        })
        .await
    {
        Ok(outcome) => {
            let response: EventResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_funnel_error(e),
    }
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

fn handle_funnel_error(error: FunnelHandlerError) -> Response {
    match error {
        FunnelHandlerError::Resolve(ResolveError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Business", id.as_str())),
        )
            .into_response(),
        FunnelHandlerError::Funnel(FunnelError::SubmissionInFlight(_)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict("A submission is already in flight")),
        )
            .into_response(),
        FunnelHandlerError::Funnel(e @ FunnelError::GuardNotSatisfied { .. })
        | FunnelHandlerError::Funnel(e @ FunnelError::InvalidTransition { .. }) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(e.to_string())),
        )
            .into_response(),
        FunnelHandlerError::Funnel(FunnelError::Validation(e))
        | FunnelHandlerError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
    }
}

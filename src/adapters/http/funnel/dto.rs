//! Request/response DTOs for funnel endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::funnel::EventOutcome;
use crate::domain::business::{BusinessProfile, Plan, TeamMember};
use crate::domain::foundation::{BusinessId, Rating, Timestamp, ValidationError};
use crate::domain::funnel::{FunnelEvent, FunnelSession, FunnelStep};
use crate::domain::routing::{Escalation, Platform, RoutingPolicy};

/// Body for POST /api/funnel/start.
///
/// The inbound link identifier is accepted under any of three aliases,
/// first one wins.
#[derive(Debug, Clone, Deserialize)]
pub struct StartFunnelRequest {
    pub biz: Option<String>,
    pub loc: Option<String>,
    pub id: Option<String>,
}

impl StartFunnelRequest {
    /// The identifier under whichever alias it arrived.
    pub fn business_param(&self) -> Option<&str> {
        self.biz
            .as_deref()
            .or(self.loc.as_deref())
            .or(self.id.as_deref())
    }
}

/// Wire shape of the funnel session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub step: FunnelStep,
    pub rating: Option<u8>,
    pub comment: String,
    pub selected_destination: Option<Platform>,
    pub started_at: Option<Timestamp>,
}

impl SessionDto {
    /// Rebuilds the domain session for the given business.
    pub fn into_domain(self, business_id: BusinessId) -> Result<FunnelSession, ValidationError> {
        let rating = self.rating.map(Rating::try_from_u8).transpose()?;
        Ok(FunnelSession {
            business_id,
            step: self.step,
            rating,
            comment: self.comment,
            selected_destination: self.selected_destination,
            started_at: self.started_at,
        })
    }
}

impl From<&FunnelSession> for SessionDto {
    fn from(session: &FunnelSession) -> Self {
        Self {
            step: session.step,
            rating: session.rating.map(|r| r.value()),
            comment: session.comment.clone(),
            selected_destination: session.selected_destination,
            started_at: session.started_at,
        }
    }
}

/// Wire shape of the business profile.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessDto {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub plan: Plan,
    pub platforms: Vec<Platform>,
    pub team: Vec<TeamMember>,
}

impl From<&BusinessProfile> for BusinessDto {
    fn from(business: &BusinessProfile) -> Self {
        Self {
            id: business.id.to_string(),
            name: business.name.clone(),
            owner_name: business.owner_name.clone(),
            plan: business.plan,
            platforms: business.platforms.clone(),
            team: business.team.clone(),
        }
    }
}

/// An event posted by the funnel client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EventDto {
    Begin,
    Rate { rating: u8 },
    Comment { text: String },
    Confirm,
    SelectDestination { destination: Platform },
    Submit,
    Back,
    Restart,
}

impl EventDto {
    /// Converts to the domain event, validating embedded values.
    pub fn into_domain(self) -> Result<FunnelEvent, ValidationError> {
        Ok(match self {
            EventDto::Begin => FunnelEvent::Begin,
            EventDto::Rate { rating } => FunnelEvent::RateSelected(Rating::try_from_u8(rating)?),
            EventDto::Comment { text } => FunnelEvent::CommentChanged(text),
            EventDto::Confirm => FunnelEvent::ConfirmComment,
            EventDto::SelectDestination { destination } => {
                FunnelEvent::DestinationSelected(destination)
            }
            EventDto::Submit => FunnelEvent::Submit,
            EventDto::Back => FunnelEvent::Back,
            EventDto::Restart => FunnelEvent::Restart,
        })
    }
}

/// Body for POST /api/funnel/:biz/event.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyEventRequest {
    pub session: SessionDto,
    pub event: EventDto,
}

/// Response carrying the funnel view after a start or state read.
#[derive(Debug, Clone, Serialize)]
pub struct FunnelStateResponse {
    pub business: BusinessDto,
    pub session: SessionDto,
    pub recovered: bool,
    /// True when the chosen rating means a private sync will be enforced;
    /// the client surfaces this before submit rather than after.
    pub privacy_shield: bool,
}

/// Response for GET /api/funnel/:biz/state.
#[derive(Debug, Clone, Serialize)]
pub struct StateResponse {
    pub session: SessionDto,
    pub privacy_shield: bool,
}

/// Response after applying one event.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub session: SessionDto,
    /// External URL the client opens in a new browsing context, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Escalation action offered on the thank-you screen, when eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Escalation>,
    pub session_cleared: bool,
    pub privacy_shield: bool,
}

impl From<EventOutcome> for EventResponse {
    fn from(outcome: EventOutcome) -> Self {
        let privacy_shield = outcome
            .session
            .rating
            .map(RoutingPolicy::privacy_shield_active)
            .unwrap_or(false);
        Self {
            session: SessionDto::from(&outcome.session),
            redirect_url: outcome.redirect_url,
            escalation: outcome.escalation,
            session_cleared: outcome.session_cleared,
            privacy_shield,
        }
    }
}

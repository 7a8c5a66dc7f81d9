//! Pure reducer for the funnel state machine.
//!
//! `reduce` maps (session, event) to a new session plus an ordered list of
//! effects. Persistence, redirects and messaging are described by the
//! effects and executed by the application layer; the reducer itself never
//! touches I/O.

use super::{FunnelError, FunnelSession, FunnelStep};
use crate::domain::business::BusinessProfile;
use crate::domain::foundation::{Rating, Timestamp};
use crate::domain::routing::{Escalation, Platform, RoutingPolicy};

/// An event fed into the funnel state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum FunnelEvent {
    /// Reviewer advances past the landing screen.
    Begin,
    /// Reviewer picks a star rating.
    RateSelected(Rating),
    /// Reviewer edits the feedback text.
    CommentChanged(String),
    /// Reviewer confirms the feedback text.
    ConfirmComment,
    /// Reviewer picks a sync destination.
    DestinationSelected(Platform),
    /// Reviewer commits the submission.
    Submit,
    /// Back navigation.
    Back,
    /// Discard everything and start over.
    Restart,
}

impl FunnelEvent {
    fn name(&self) -> &'static str {
        match self {
            FunnelEvent::Begin => "begin",
            FunnelEvent::RateSelected(_) => "rate",
            FunnelEvent::CommentChanged(_) => "comment",
            FunnelEvent::ConfirmComment => "confirm",
            FunnelEvent::DestinationSelected(_) => "select-destination",
            FunnelEvent::Submit => "submit",
            FunnelEvent::Back => "back",
            FunnelEvent::Restart => "restart",
        }
    }
}

/// A side effect requested by a transition, executed by the caller in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the session record (with a fresh timestamp) to the store.
    PersistSession,
    /// Stand in for the backend write: wait out the configured latency.
    SimulateBackendWrite,
    /// Open the external redirect in a new browsing context.
    OpenRedirect(String),
    /// Delete the persisted session record.
    ClearSession,
    /// Offer the manager escalation action on the thank-you screen.
    OfferEscalation(Escalation),
}

/// Result of a successful reduction: the new state and its effects.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: FunnelSession,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn pure(session: FunnelSession) -> Self {
        Self { session, effects: Vec::new() }
    }

    fn with_effects(session: FunnelSession, effects: Vec<Effect>) -> Self {
        Self { session, effects }
    }
}

/// Applies one event to the session, returning the new state and effects.
///
/// Guard failures and out-of-step events return errors and leave the caller
/// holding the unchanged original; the reducer never mutates in place.
pub fn reduce(
    session: &FunnelSession,
    business: &BusinessProfile,
    event: FunnelEvent,
) -> Result<Transition, FunnelError> {
    match (&session.step, &event) {
        (FunnelStep::Landing, FunnelEvent::Begin) => {
            let mut next = session.clone();
            next.step = FunnelStep::Rating;
            Ok(Transition::pure(next))
        }

        (FunnelStep::Rating, FunnelEvent::RateSelected(rating)) => {
            let mut next = session.clone();
            next.rating = Some(*rating);
            next.step = FunnelStep::Feedback;
            mark_started(&mut next);
            Ok(Transition::with_effects(next, vec![Effect::PersistSession]))
        }

        (FunnelStep::Feedback, FunnelEvent::CommentChanged(text)) => {
            let mut next = session.clone();
            next.comment = text.clone();
            let effects = if next.has_progress() {
                mark_started(&mut next);
                vec![Effect::PersistSession]
            } else {
                Vec::new()
            };
            Ok(Transition::with_effects(next, effects))
        }

        (FunnelStep::Feedback, FunnelEvent::ConfirmComment) => {
            if !session.comment_confirmable() {
                return Err(FunnelError::guard(
                    "comment must be at least 2 characters after trimming",
                ));
            }
            let mut next = session.clone();
            next.step = FunnelStep::PlatformSelect;
            Ok(Transition::pure(next))
        }

        (FunnelStep::PlatformSelect, FunnelEvent::DestinationSelected(platform)) => {
            let mut next = session.clone();
            next.selected_destination = Some(*platform);
            Ok(Transition::pure(next))
        }

        (FunnelStep::PlatformSelect, FunnelEvent::Submit) => submit(session, business),

        (_, FunnelEvent::Back) => match session.step.back_target() {
            Some(target) => {
                let mut next = session.clone();
                next.step = target;
                Ok(Transition::pure(next))
            }
            None => Err(FunnelError::invalid_transition(session.step, "back")),
        },

        (FunnelStep::ThankYou, FunnelEvent::Restart) => {
            Ok(Transition::pure(FunnelSession::new(session.business_id.clone())))
        }

        (step, event) => Err(FunnelError::invalid_transition(*step, event.name())),
    }
}

/// Stamps the session start the first time rating or comment holds content.
fn mark_started(session: &mut FunnelSession) {
    if session.started_at.is_none() {
        session.started_at = Some(Timestamp::now());
    }
}

/// The guarded final submission.
///
/// Ratings at or below the detractor threshold are routed privately even
/// when the reviewer picked a public platform; the explicit choice is
/// overridden to keep negative sentiment off public platforms.
fn submit(
    session: &FunnelSession,
    business: &BusinessProfile,
) -> Result<Transition, FunnelError> {
    let destination = session
        .selected_destination
        .ok_or_else(|| FunnelError::guard("no destination selected"))?;
    let rating = session
        .rating
        .ok_or_else(|| FunnelError::guard("no rating selected"))?;

    let decision = RoutingPolicy::decide(rating, destination, &business.name);

    let mut effects = vec![Effect::SimulateBackendWrite];
    if let Some(url) = &decision.target_url {
        effects.push(Effect::OpenRedirect(url.clone()));
    }
    effects.push(Effect::ClearSession);
    if decision.escalation_eligible {
        effects.push(Effect::OfferEscalation(Escalation::compose(
            business,
            rating,
            &session.comment,
        )));
    }

    let mut next = session.clone();
    next.step = FunnelStep::ThankYou;
    Ok(Transition::with_effects(next, effects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::Plan;
    use crate::domain::foundation::BusinessId;

    fn business() -> BusinessProfile {
        BusinessProfile {
            id: BusinessId::new("merlin-cambridge-001").unwrap(),
            name: "Merlin Cambridge".to_string(),
            owner_name: "Alex Johnson".to_string(),
            email: "admin@merlin-hospitality.com".to_string(),
            whatsapp_number: "919876543210".to_string(),
            plan: Plan::Pro,
            platforms: vec![Platform::Google, Platform::Zomato, Platform::Justdial],
            team: vec![],
        }
    }

    fn fresh() -> FunnelSession {
        FunnelSession::new(BusinessId::new("merlin-cambridge-001").unwrap())
    }

    fn session_at_platform_select(rating: Rating, comment: &str) -> FunnelSession {
        let mut session = fresh();
        session.rating = Some(rating);
        session.comment = comment.to_string();
        session.step = FunnelStep::PlatformSelect;
        session
    }

    #[test]
    fn begin_advances_to_rating_with_no_effects() {
        let t = reduce(&fresh(), &business(), FunnelEvent::Begin).unwrap();
        assert_eq!(t.session.step, FunnelStep::Rating);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn rating_choice_advances_and_persists() {
        let mut session = fresh();
        session.step = FunnelStep::Rating;
        let t = reduce(&session, &business(), FunnelEvent::RateSelected(Rating::Four)).unwrap();
        assert_eq!(t.session.step, FunnelStep::Feedback);
        assert_eq!(t.session.rating, Some(Rating::Four));
        assert_eq!(t.effects, vec![Effect::PersistSession]);
        assert!(t.session.started_at.is_some());
    }

    #[test]
    fn comment_edit_persists_when_progress_exists() {
        let mut session = fresh();
        session.step = FunnelStep::Feedback;
        session.rating = Some(Rating::Five);
        let t = reduce(
            &session,
            &business(),
            FunnelEvent::CommentChanged("Loved it".to_string()),
        )
        .unwrap();
        assert_eq!(t.session.comment, "Loved it");
        assert_eq!(t.effects, vec![Effect::PersistSession]);
    }

    #[test]
    fn confirm_rejects_comment_shorter_than_two_trimmed_chars() {
        let mut session = fresh();
        session.step = FunnelStep::Feedback;
        session.rating = Some(Rating::Five);
        session.comment = " a ".to_string();
        let result = reduce(&session, &business(), FunnelEvent::ConfirmComment);
        assert!(matches!(result, Err(FunnelError::GuardNotSatisfied { .. })));
    }

    #[test]
    fn confirm_advances_with_valid_comment() {
        let mut session = fresh();
        session.step = FunnelStep::Feedback;
        session.rating = Some(Rating::Five);
        session.comment = "ok".to_string();
        let t = reduce(&session, &business(), FunnelEvent::ConfirmComment).unwrap();
        assert_eq!(t.session.step, FunnelStep::PlatformSelect);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn destination_selection_does_not_persist() {
        let session = session_at_platform_select(Rating::Five, "Loved it");
        let t = reduce(
            &session,
            &business(),
            FunnelEvent::DestinationSelected(Platform::Google),
        )
        .unwrap();
        assert_eq!(t.session.selected_destination, Some(Platform::Google));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn submit_without_destination_is_guarded() {
        let session = session_at_platform_select(Rating::Five, "Loved it");
        let result = reduce(&session, &business(), FunnelEvent::Submit);
        assert!(matches!(result, Err(FunnelError::GuardNotSatisfied { .. })));
    }

    #[test]
    fn promoter_submit_to_google_redirects_and_clears() {
        let mut session = session_at_platform_select(Rating::Five, "Loved it");
        session.selected_destination = Some(Platform::Google);
        let t = reduce(&session, &business(), FunnelEvent::Submit).unwrap();

        assert_eq!(t.session.step, FunnelStep::ThankYou);
        assert_eq!(t.effects[0], Effect::SimulateBackendWrite);
        assert!(matches!(&t.effects[1], Effect::OpenRedirect(url) if url.contains("Merlin%20Cambridge")));
        assert_eq!(t.effects[2], Effect::ClearSession);
        assert!(!t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::OfferEscalation(_))));
    }

    #[test]
    fn detractor_submit_to_google_stays_private_and_offers_escalation() {
        let mut session = session_at_platform_select(Rating::Two, "Too slow");
        session.selected_destination = Some(Platform::Google);
        let t = reduce(&session, &business(), FunnelEvent::Submit).unwrap();

        assert_eq!(t.session.step, FunnelStep::ThankYou);
        assert!(!t.effects.iter().any(|e| matches!(e, Effect::OpenRedirect(_))));
        assert!(t.effects.contains(&Effect::ClearSession));
        let escalation = t.effects.iter().find_map(|e| match e {
            Effect::OfferEscalation(esc) => Some(esc.clone()),
            _ => None,
        });
        let escalation = escalation.expect("escalation offered");
        assert!(escalation.message.contains("Too slow"));
        assert!(escalation.link.starts_with("https://wa.me/919876543210"));
    }

    #[test]
    fn internal_only_submit_offers_escalation_for_any_rating() {
        let mut session = session_at_platform_select(Rating::Five, "Loved it");
        session.selected_destination = Some(Platform::InternalOnly);
        let t = reduce(&session, &business(), FunnelEvent::Submit).unwrap();
        assert!(t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::OfferEscalation(_))));
        assert!(!t.effects.iter().any(|e| matches!(e, Effect::OpenRedirect(_))));
    }

    #[test]
    fn back_walks_the_table_backwards() {
        let mut session = fresh();
        session.step = FunnelStep::PlatformSelect;
        let t = reduce(&session, &business(), FunnelEvent::Back).unwrap();
        assert_eq!(t.session.step, FunnelStep::Feedback);

        let t = reduce(&t.session, &business(), FunnelEvent::Back).unwrap();
        assert_eq!(t.session.step, FunnelStep::Rating);

        let t = reduce(&t.session, &business(), FunnelEvent::Back).unwrap();
        assert_eq!(t.session.step, FunnelStep::Landing);
    }

    #[test]
    fn back_from_landing_is_invalid() {
        let result = reduce(&fresh(), &business(), FunnelEvent::Back);
        assert!(matches!(result, Err(FunnelError::InvalidTransition { .. })));
    }

    #[test]
    fn restart_from_thank_you_yields_fresh_session() {
        let mut session = session_at_platform_select(Rating::Five, "Loved it");
        session.step = FunnelStep::ThankYou;
        let t = reduce(&session, &business(), FunnelEvent::Restart).unwrap();
        assert_eq!(t.session.step, FunnelStep::Landing);
        assert!(t.session.rating.is_none());
        assert!(t.session.comment.is_empty());
    }

    #[test]
    fn out_of_step_events_are_rejected() {
        let result = reduce(&fresh(), &business(), FunnelEvent::Submit);
        assert!(matches!(result, Err(FunnelError::InvalidTransition { .. })));

        let mut session = fresh();
        session.step = FunnelStep::ThankYou;
        let result = reduce(&session, &business(), FunnelEvent::Begin);
        assert!(matches!(result, Err(FunnelError::InvalidTransition { .. })));
    }
}

//! Integration tests for the funnel flow.
//!
//! These tests wire the application handlers against real in-memory
//! adapters and walk the funnel the way a client would:
//! 1. Start (tenant resolution + session recovery)
//! 2. Events through the reducer with persistence side effects
//! 3. Final submission with routing, redirect and escalation directives

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use std::time::Duration;

use reviewmaster::adapters::registry::StaticRegistry;
use reviewmaster::adapters::storage::InMemorySessionStore;
use reviewmaster::application::handlers::funnel::{
    ApplyEventCommand, ApplyEventHandler, EventOutcome, FunnelHandlerError, StartFunnelCommand,
    StartFunnelHandler,
};
use reviewmaster::domain::foundation::{BusinessId, Rating, Timestamp};
use reviewmaster::domain::funnel::{FunnelError, FunnelEvent, FunnelSession, FunnelStep, SessionRecord};
use reviewmaster::domain::routing::Platform;
use reviewmaster::ports::{SessionStore, SessionStoreError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn biz() -> BusinessId {
    BusinessId::new("merlin-cambridge-001").unwrap()
}

fn store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)))
}

fn start_handler(store: Arc<InMemorySessionStore>) -> StartFunnelHandler {
    StartFunnelHandler::new(Arc::new(StaticRegistry::new()), store)
}

fn apply_handler(store: Arc<dyn SessionStore>) -> ApplyEventHandler {
    ApplyEventHandler::new(
        Arc::new(StaticRegistry::new()),
        store,
        Duration::from_millis(0),
    )
}

async fn apply(
    handler: &ApplyEventHandler,
    session: FunnelSession,
    event: FunnelEvent,
) -> EventOutcome {
    handler
        .handle(ApplyEventCommand {
            business_id: biz(),
            session,
            event,
        })
        .await
        .expect("event accepted")
}

/// Session store that fails every write, to verify the funnel swallows
/// storage unavailability.
struct BrokenSessionStore;

#[async_trait]
impl SessionStore for BrokenSessionStore {
    async fn put(&self, _id: &BusinessId, _r: &SessionRecord) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::IoError("disk on fire".to_string()))
    }

    async fn get(&self, _id: &BusinessId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(None)
    }

    async fn delete(&self, _id: &BusinessId) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::IoError("disk on fire".to_string()))
    }
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn full_promoter_walk_redirects_and_clears_the_session() {
    let store = store();
    let start = start_handler(store.clone());
    let events = apply_handler(store.clone());

    let started = start
        .handle(StartFunnelCommand {
            raw_business_id: "merlin-cambridge-001".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(started.session.step, FunnelStep::Landing);

    let outcome = apply(&events, started.session, FunnelEvent::Begin).await;
    assert_eq!(outcome.session.step, FunnelStep::Rating);

    let outcome = apply(
        &events,
        outcome.session,
        FunnelEvent::RateSelected(Rating::Five),
    )
    .await;
    assert_eq!(outcome.session.step, FunnelStep::Feedback);
    assert_eq!(store.get(&biz()).await.unwrap().unwrap().rating, 5);

    let outcome = apply(
        &events,
        outcome.session,
        FunnelEvent::CommentChanged("Loved it".to_string()),
    )
    .await;
    assert_eq!(store.get(&biz()).await.unwrap().unwrap().comment, "Loved it");

    let outcome = apply(&events, outcome.session, FunnelEvent::ConfirmComment).await;
    assert_eq!(outcome.session.step, FunnelStep::PlatformSelect);

    let outcome = apply(
        &events,
        outcome.session,
        FunnelEvent::DestinationSelected(Platform::Google),
    )
    .await;

    let outcome = apply(&events, outcome.session, FunnelEvent::Submit).await;
    assert_eq!(outcome.session.step, FunnelStep::ThankYou);

    // Public disposition: redirect embedding the business name, no
    // escalation offer, recovery record gone.
    let url = outcome.redirect_url.expect("redirect produced");
    assert!(url.contains("Merlin%20Cambridge"));
    assert!(outcome.escalation.is_none());
    assert!(outcome.session_cleared);
    assert!(store.get(&biz()).await.unwrap().is_none());
}

#[tokio::test]
async fn detractor_walk_stays_private_and_offers_escalation() {
    let store = store();
    let events = apply_handler(store.clone());

    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::Rating;

    let outcome = apply(&events, session, FunnelEvent::RateSelected(Rating::Two)).await;
    let outcome = apply(
        &events,
        outcome.session,
        FunnelEvent::CommentChanged("Too slow".to_string()),
    )
    .await;
    let outcome = apply(&events, outcome.session, FunnelEvent::ConfirmComment).await;
    let outcome = apply(
        &events,
        outcome.session,
        FunnelEvent::DestinationSelected(Platform::Google),
    )
    .await;
    let outcome = apply(&events, outcome.session, FunnelEvent::Submit).await;

    // The explicit Google choice is overridden: private, no redirect.
    assert!(outcome.redirect_url.is_none());
    assert!(outcome.session_cleared);

    let escalation = outcome.escalation.expect("escalation offered");
    assert!(escalation.message.contains("2\u{2605}"));
    assert!(escalation.message.contains("Too slow"));
    assert!(escalation.link.starts_with("https://wa.me/919876543210?text="));
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test]
async fn recovery_after_reload_skips_completed_steps() {
    let store = store();
    let events = apply_handler(store.clone());
    let start = start_handler(store.clone());

    // First visit: rate and comment, then "reload".
    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::Rating;
    let outcome = apply(&events, session, FunnelEvent::RateSelected(Rating::Five)).await;
    apply(
        &events,
        outcome.session,
        FunnelEvent::CommentChanged("Great!".to_string()),
    )
    .await;

    // Fresh mount recovers both fields and resumes at platform-select.
    let recovered = start
        .handle(StartFunnelCommand {
            raw_business_id: "merlin-cambridge-001".to_string(),
        })
        .await
        .unwrap();

    assert!(recovered.recovered);
    assert_eq!(recovered.session.step, FunnelStep::PlatformSelect);
    assert_eq!(recovered.session.rating, Some(Rating::Five));
    assert_eq!(recovered.session.comment, "Great!");
    // The destination is never recovered; it must be re-picked.
    assert!(recovered.session.selected_destination.is_none());
}

#[tokio::test]
async fn recovery_with_rating_only_resumes_at_feedback() {
    let store = store();
    store
        .put(
            &biz(),
            &SessionRecord {
                rating: 4,
                comment: String::new(),
                timestamp: Timestamp::now(),
                business_id: biz().to_string(),
            },
        )
        .await
        .unwrap();

    let recovered = start_handler(store)
        .handle(StartFunnelCommand {
            raw_business_id: "merlin-cambridge-001".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(recovered.session.step, FunnelStep::Feedback);
    assert_eq!(recovered.session.rating, Some(Rating::Four));
}

#[tokio::test]
async fn expired_session_is_not_recovered() {
    let store = store();
    store
        .put(
            &biz(),
            &SessionRecord {
                rating: 5,
                comment: "Great!".to_string(),
                timestamp: Timestamp::now().minus_secs(31 * 60),
                business_id: biz().to_string(),
            },
        )
        .await
        .unwrap();

    let result = start_handler(store)
        .handle(StartFunnelCommand {
            raw_business_id: "merlin-cambridge-001".to_string(),
        })
        .await
        .unwrap();

    assert!(!result.recovered);
    assert_eq!(result.session.step, FunnelStep::Landing);
}

// =============================================================================
// Guards and failure paths
// =============================================================================

#[tokio::test]
async fn one_character_comment_cannot_confirm() {
    let events = apply_handler(store());

    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::Feedback;
    session.rating = Some(Rating::Four);
    session.comment = "a".to_string();

    let result = events
        .handle(ApplyEventCommand {
            business_id: biz(),
            session,
            event: FunnelEvent::ConfirmComment,
        })
        .await;

    assert!(matches!(
        result,
        Err(FunnelHandlerError::Funnel(FunnelError::GuardNotSatisfied { .. }))
    ));
}

#[tokio::test]
async fn unknown_business_fails_resolution_at_start() {
    let result = start_handler(store())
        .handle(StartFunnelCommand {
            raw_business_id: "ghost-biz-999".to_string(),
        })
        .await;

    assert!(matches!(result, Err(FunnelHandlerError::Resolve(_))));
}

#[tokio::test]
async fn storage_write_failure_does_not_block_the_funnel() {
    let events = apply_handler(Arc::new(BrokenSessionStore));

    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::Rating;

    // The put fails inside, but the transition still lands.
    let outcome = apply(&events, session, FunnelEvent::RateSelected(Rating::Four)).await;
    assert_eq!(outcome.session.step, FunnelStep::Feedback);
}

#[tokio::test]
async fn storage_delete_failure_does_not_block_submission() {
    let events = apply_handler(Arc::new(BrokenSessionStore));

    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::PlatformSelect;
    session.rating = Some(Rating::Five);
    session.comment = "Loved it".to_string();
    session.selected_destination = Some(Platform::Google);

    let outcome = apply(&events, session, FunnelEvent::Submit).await;
    assert_eq!(outcome.session.step, FunnelStep::ThankYou);
    assert!(outcome.redirect_url.is_some());
}

#[tokio::test]
async fn restart_after_thank_you_is_a_fresh_session() {
    let events = apply_handler(store());

    let mut session = FunnelSession::new(biz());
    session.step = FunnelStep::ThankYou;
    session.rating = Some(Rating::Five);
    session.comment = "Loved it".to_string();

    let outcome = apply(&events, session, FunnelEvent::Restart).await;
    assert_eq!(outcome.session.step, FunnelStep::Landing);
    assert!(outcome.session.rating.is_none());
    assert!(outcome.session.comment.is_empty());
}

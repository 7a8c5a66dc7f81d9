//! ApplyEventHandler - runs the pure reducer and executes its effects.
//!
//! The reducer decides; this handler is the only place funnel effects touch
//! I/O. Store failures are logged and swallowed so the funnel never stalls
//! on persistence trouble.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::foundation::{BusinessId, Timestamp};
use crate::domain::funnel::{reduce, Effect, FunnelError, FunnelEvent, FunnelSession};
use crate::domain::routing::Escalation;
use crate::ports::{SessionStore, TenantResolver};

use super::FunnelHandlerError;

/// Command carrying the client-held session and the event to apply.
#[derive(Debug, Clone)]
pub struct ApplyEventCommand {
    pub business_id: BusinessId,
    pub session: FunnelSession,
    pub event: FunnelEvent,
}

/// Outcome of an applied event: the new state plus the directives the
/// client executes (open a redirect, offer the escalation action).
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub session: FunnelSession,
    pub redirect_url: Option<String>,
    pub escalation: Option<Escalation>,
    pub session_cleared: bool,
}

/// Handler applying funnel events.
pub struct ApplyEventHandler {
    resolver: Arc<dyn TenantResolver>,
    store: Arc<dyn SessionStore>,
    submit_latency: Duration,
    /// Businesses with a submission currently in flight (re-entrancy guard).
    in_flight: Mutex<HashSet<String>>,
}

impl ApplyEventHandler {
    pub fn new(
        resolver: Arc<dyn TenantResolver>,
        store: Arc<dyn SessionStore>,
        submit_latency: Duration,
    ) -> Self {
        Self {
            resolver,
            store,
            submit_latency,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn handle(&self, cmd: ApplyEventCommand) -> Result<EventOutcome, FunnelHandlerError> {
        let is_submit = matches!(cmd.event, FunnelEvent::Submit);

        if is_submit {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(cmd.business_id.to_string()) {
                return Err(FunnelError::SubmissionInFlight(cmd.business_id.clone()).into());
            }
        }

        let result = self.apply(&cmd).await;

        if is_submit {
            self.in_flight.lock().await.remove(cmd.business_id.as_str());
        }

        result
    }

    async fn apply(&self, cmd: &ApplyEventCommand) -> Result<EventOutcome, FunnelHandlerError> {
        let business = self.resolver.resolve(&cmd.business_id).await?;

        let transition = reduce(&cmd.session, &business, cmd.event.clone())?;

        let mut outcome = EventOutcome {
            session: transition.session,
            redirect_url: None,
            escalation: None,
            session_cleared: false,
        };

        for effect in transition.effects {
            match effect {
                Effect::PersistSession => {
                    if let Some(record) = outcome.session.record(Timestamp::now()) {
                        if let Err(e) = self.store.put(&cmd.business_id, &record).await {
                            warn!(business_id = %cmd.business_id, error = %e, "session write failed");
                        }
                    }
                }
                Effect::SimulateBackendWrite => {
                    sleep(self.submit_latency).await;
                }
                Effect::OpenRedirect(url) => {
                    info!(business_id = %cmd.business_id, url = %url, "public redirect produced");
                    outcome.redirect_url = Some(url);
                }
                Effect::ClearSession => {
                    if let Err(e) = self.store.delete(&cmd.business_id).await {
                        warn!(business_id = %cmd.business_id, error = %e, "session delete failed");
                    }
                    outcome.session_cleared = true;
                }
                Effect::OfferEscalation(escalation) => {
                    outcome.escalation = Some(escalation);
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::StaticRegistry;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::Rating;
    use crate::domain::funnel::FunnelStep;
    use crate::domain::routing::Platform;
    use chrono::Duration as ChronoDuration;

    fn biz() -> BusinessId {
        BusinessId::new("merlin-cambridge-001").unwrap()
    }

    fn handler(store: Arc<InMemorySessionStore>) -> ApplyEventHandler {
        ApplyEventHandler::new(
            Arc::new(StaticRegistry::new()),
            store,
            Duration::from_millis(0),
        )
    }

    fn session_at_platform_select(rating: Rating, comment: &str) -> FunnelSession {
        let mut session = FunnelSession::new(biz());
        session.rating = Some(rating);
        session.comment = comment.to_string();
        session.step = FunnelStep::PlatformSelect;
        session.selected_destination = Some(Platform::Google);
        session
    }

    #[tokio::test]
    async fn rating_event_writes_the_session_record() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let handler = handler(store.clone());

        let mut session = FunnelSession::new(biz());
        session.step = FunnelStep::Rating;

        let outcome = handler
            .handle(ApplyEventCommand {
                business_id: biz(),
                session,
                event: FunnelEvent::RateSelected(Rating::Four),
            })
            .await
            .unwrap();

        assert_eq!(outcome.session.step, FunnelStep::Feedback);
        let record = store.get(&biz()).await.unwrap().unwrap();
        assert_eq!(record.rating, 4);
    }

    #[tokio::test]
    async fn promoter_submit_produces_redirect_and_clears_store() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let id = biz();
        let session = session_at_platform_select(Rating::Five, "Loved it");
        store
            .put(&id, &session.record(Timestamp::now()).unwrap())
            .await
            .unwrap();
        let handler = handler(store.clone());

        let outcome = handler
            .handle(ApplyEventCommand {
                business_id: id.clone(),
                session,
                event: FunnelEvent::Submit,
            })
            .await
            .unwrap();

        assert_eq!(outcome.session.step, FunnelStep::ThankYou);
        assert!(outcome.redirect_url.unwrap().contains("Merlin%20Cambridge"));
        assert!(outcome.escalation.is_none());
        assert!(outcome.session_cleared);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn detractor_submit_offers_escalation_and_no_redirect() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let handler = handler(store);

        let outcome = handler
            .handle(ApplyEventCommand {
                business_id: biz(),
                session: session_at_platform_select(Rating::Two, "Too slow"),
                event: FunnelEvent::Submit,
            })
            .await
            .unwrap();

        assert!(outcome.redirect_url.is_none());
        let escalation = outcome.escalation.unwrap();
        assert!(escalation.message.contains("Too slow"));
    }

    #[tokio::test]
    async fn guard_failure_passes_through() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let handler = handler(store);

        let mut session = session_at_platform_select(Rating::Five, "Loved it");
        session.selected_destination = None;

        let result = handler
            .handle(ApplyEventCommand {
                business_id: biz(),
                session,
                event: FunnelEvent::Submit,
            })
            .await;

        assert!(matches!(
            result,
            Err(FunnelHandlerError::Funnel(FunnelError::GuardNotSatisfied { .. }))
        ));
    }

    #[tokio::test]
    async fn concurrent_submits_for_one_business_are_rejected() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let handler = Arc::new(ApplyEventHandler::new(
            Arc::new(StaticRegistry::new()),
            store,
            Duration::from_millis(200),
        ));

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .handle(ApplyEventCommand {
                        business_id: biz(),
                        session: session_at_platform_select(Rating::Five, "Loved it"),
                        event: FunnelEvent::Submit,
                    })
                    .await
            })
        };

        // Give the first submission time to enter its latency window.
        sleep(Duration::from_millis(50)).await;

        let second = handler
            .handle(ApplyEventCommand {
                business_id: biz(),
                session: session_at_platform_select(Rating::Five, "Loved it"),
                event: FunnelEvent::Submit,
            })
            .await;

        assert!(matches!(
            second,
            Err(FunnelHandlerError::Funnel(FunnelError::SubmissionInFlight(_)))
        ));
        assert!(first.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn back_event_does_not_touch_the_store() {
        let store = Arc::new(InMemorySessionStore::new(ChronoDuration::minutes(30)));
        let handler = handler(store.clone());

        let mut session = FunnelSession::new(biz());
        session.step = FunnelStep::Rating;

        let outcome = handler
            .handle(ApplyEventCommand {
                business_id: biz(),
                session,
                event: FunnelEvent::Back,
            })
            .await
            .unwrap();

        assert_eq!(outcome.session.step, FunnelStep::Landing);
        assert_eq!(store.record_count().await, 0);
    }
}

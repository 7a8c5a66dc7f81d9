//! Integration tests for the dashboard surface.
//!
//! Wires the dashboard handlers against the seeded adapters and the mock AI
//! client, covering draft generation, the insight digest, and the degraded
//! states of the grounded panels.

use std::sync::Arc;

use reviewmaster::adapters::ai::MockAiClient;
use reviewmaster::adapters::registry::{SeededReviewInbox, StaticRegistry};
use reviewmaster::application::handlers::dashboard::{
    DashboardHandlerError, DraftReplyCommand, DraftReplyHandler, GetOverviewHandler,
    GetOverviewQuery, ListReviewsHandler, ListReviewsQuery, LocalInsightsQuery, MarketIntelHandler,
    MarketTrendsQuery, StrategicInsightsCommand, StrategicInsightsHandler,
};
use reviewmaster::domain::foundation::BusinessId;
use reviewmaster::domain::review::Visibility;
use reviewmaster::ports::{GroundingSource, ReviewInbox, DRAFT_FALLBACK, TRENDS_DEGRADED};

fn biz() -> BusinessId {
    BusinessId::new("merlin-cambridge-001").unwrap()
}

fn resolver() -> Arc<StaticRegistry> {
    Arc::new(StaticRegistry::new())
}

#[tokio::test]
async fn overview_aggregates_and_share_link_line_up() {
    let handler = GetOverviewHandler::new(resolver(), Arc::new(SeededReviewInbox::new()));

    let overview = handler
        .handle(GetOverviewQuery { business_id: biz() })
        .await
        .unwrap();

    assert_eq!(overview.total_reviews, 3);
    assert_eq!(overview.private_reviews, 1);
    assert_eq!(overview.share_query, "?biz=merlin-cambridge-001");
    assert_eq!(overview.business.name, "Merlin Cambridge");
}

#[tokio::test]
async fn inbox_filters_compose_with_the_seed_data() {
    let handler = ListReviewsHandler::new(resolver(), Arc::new(SeededReviewInbox::new()));

    let private = handler
        .handle(ListReviewsQuery {
            business_id: biz(),
            visibility: Some(Visibility::Private),
            platform: None,
        })
        .await
        .unwrap();

    assert_eq!(private.len(), 1);
    assert!(private[0].rating.is_detractor());
}

#[tokio::test]
async fn draft_reply_lands_on_the_review_and_reports_provenance() {
    let inbox = Arc::new(SeededReviewInbox::new());
    let review_id = inbox.list_for_business(&biz()).await.unwrap()[0].id;
    let handler = DraftReplyHandler::new(
        resolver(),
        inbox.clone(),
        Arc::new(MockAiClient::new().with_draft("So glad you enjoyed it, Sarah!")),
    );

    let result = handler
        .handle(DraftReplyCommand {
            business_id: biz(),
            review_id,
        })
        .await
        .unwrap();

    assert!(!result.degraded);
    let stored = inbox.find(&biz(), &review_id).await.unwrap().unwrap();
    assert_eq!(stored.ai_draft.as_deref(), Some("So glad you enjoyed it, Sarah!"));
}

#[tokio::test]
async fn dead_ai_collaborator_degrades_the_draft_but_never_errors() {
    let inbox = Arc::new(SeededReviewInbox::new());
    let review_id = inbox.list_for_business(&biz()).await.unwrap()[0].id;
    let handler = DraftReplyHandler::new(resolver(), inbox, Arc::new(MockAiClient::new()));

    let result = handler
        .handle(DraftReplyCommand {
            business_id: biz(),
            review_id,
        })
        .await
        .unwrap();

    assert!(result.degraded);
    assert_eq!(result.draft, DRAFT_FALLBACK);
}

#[tokio::test]
async fn insight_plan_splits_into_numbered_points() {
    let handler = StrategicInsightsHandler::new(
        resolver(),
        Arc::new(SeededReviewInbox::new()),
        Arc::new(
            MockAiClient::new()
                .with_insights("1. Shorten waits\n2. Greet regulars by name\n3. Follow up privately"),
        ),
    );

    let result = handler
        .handle(StrategicInsightsCommand { business_id: biz() })
        .await
        .unwrap();

    assert_eq!(result.points.len(), 3);
    assert!(result.points[1].contains("regulars"));
}

#[tokio::test]
async fn market_trends_carry_success_flag_and_sources() {
    let handler = MarketIntelHandler::new(
        Arc::new(MockAiClient::new().with_trends(
            "Hyper-personalization is the differentiator.",
            vec![GroundingSource {
                title: "Industry Report".to_string(),
                uri: "https://example.com/report".to_string(),
            }],
        )),
        true,
    );

    let answer = handler
        .market_trends(MarketTrendsQuery {
            niche: "Hospitality".to_string(),
        })
        .await;

    assert!(answer.success);
    assert_eq!(answer.sources.len(), 1);
}

#[tokio::test]
async fn degraded_trends_are_distinct_from_empty_data() {
    let handler = MarketIntelHandler::new(Arc::new(MockAiClient::new()), true);

    let answer = handler
        .market_trends(MarketTrendsQuery {
            niche: "Hospitality".to_string(),
        })
        .await;

    assert!(!answer.success);
    assert_eq!(answer.text, TRENDS_DEGRADED);
}

#[tokio::test]
async fn local_insights_accept_missing_coordinates() {
    let handler = MarketIntelHandler::new(
        Arc::new(MockAiClient::new().with_local("Two strong rivals nearby.", vec![])),
        true,
    );

    let answer = handler
        .local_insights(LocalInsightsQuery {
            business_type: "Fine Dining".to_string(),
            lat: None,
            lng: None,
        })
        .await;

    assert!(answer.success);
}

#[tokio::test]
async fn unknown_business_fails_resolution() {
    let handler = GetOverviewHandler::new(resolver(), Arc::new(SeededReviewInbox::new()));

    let result = handler
        .handle(GetOverviewQuery {
            business_id: BusinessId::new("ghost-biz").unwrap(),
        })
        .await;

    assert!(matches!(result, Err(DashboardHandlerError::Resolve(_))));
}

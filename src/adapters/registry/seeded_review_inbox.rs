//! Seeded Review Inbox Adapter
//!
//! Holds the demo review inbox in memory, pre-populated with seed data.
//! Draft annotations mutate the in-memory copy; nothing is durable.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{BusinessId, DomainError, ErrorCode, Rating, ReviewId, Timestamp};
use crate::domain::review::{Review, Visibility};
use crate::domain::routing::Platform;
use crate::ports::ReviewInbox;

/// In-memory review inbox seeded with demo data.
#[derive(Debug, Clone)]
pub struct SeededReviewInbox {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl SeededReviewInbox {
    /// Create an inbox holding the demo seed reviews.
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(RwLock::new(seed_reviews())),
        }
    }

    /// Create an inbox from explicit reviews (tests).
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(RwLock::new(reviews)),
        }
    }
}

impl Default for SeededReviewInbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewInbox for SeededReviewInbox {
    async fn list_for_business(&self, id: &BusinessId) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        let mut matching: Vec<Review> = reviews
            .iter()
            .filter(|r| &r.business_id == id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn find(
        &self,
        id: &BusinessId,
        review_id: &ReviewId,
    ) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .find(|r| &r.business_id == id && &r.id == review_id)
            .cloned())
    }

    async fn save_draft(
        &self,
        id: &BusinessId,
        review_id: &ReviewId,
        draft: String,
    ) -> Result<(), DomainError> {
        let mut reviews = self.reviews.write().await;
        let review = reviews
            .iter_mut()
            .find(|r| &r.business_id == id && &r.id == review_id)
            .ok_or_else(|| DomainError::new(ErrorCode::ReviewNotFound, "Review not found"))?;
        review.ai_draft = Some(draft);
        Ok(())
    }
}

fn seed_reviews() -> Vec<Review> {
    let business_id = BusinessId::new("merlin-cambridge-001").expect("seed id");
    let now = Timestamp::now();

    // Stable ids so drafts survive process lifetime and tests can target them.
    let ids: HashMap<&str, ReviewId> = [
        ("rev-1", "5bd30a88-0f6e-4c3e-9f4e-111111111111"),
        ("rev-2", "5bd30a88-0f6e-4c3e-9f4e-222222222222"),
        ("rev-3", "5bd30a88-0f6e-4c3e-9f4e-333333333333"),
    ]
    .into_iter()
    .map(|(name, uuid)| (name, uuid.parse().expect("seed uuid")))
    .collect();

    vec![
        Review {
            id: ids["rev-1"],
            business_id: business_id.clone(),
            reviewer_name: "Sarah Jenkins".to_string(),
            rating: Rating::Five,
            text: "Absolutely fantastic experience! The interface is so intuitive and sleek. \
                   The team was very helpful."
                .to_string(),
            visibility: Visibility::Public,
            platform: Some(Platform::Google),
            created_at: now,
            ai_draft: None,
            resolved: false,
        },
        Review {
            id: ids["rev-2"],
            business_id: business_id.clone(),
            reviewer_name: "John Doe".to_string(),
            rating: Rating::Two,
            text: "Decent place, but the wait time was a bit longer than I anticipated. \
                   Hope they fix it."
                .to_string(),
            visibility: Visibility::Private,
            platform: Some(Platform::Google),
            created_at: now.minus_secs(3600),
            ai_draft: None,
            resolved: false,
        },
        Review {
            id: ids["rev-3"],
            business_id,
            reviewer_name: "Michael Chen".to_string(),
            rating: Rating::Four,
            text: "Really liked the vibe. The staff knows what they're doing. \
                   Will be back for sure."
                .to_string(),
            visibility: Visibility::Public,
            platform: Some(Platform::Yelp),
            created_at: now.minus_secs(86_400),
            ai_draft: None,
            resolved: true,
        },
    ]
}

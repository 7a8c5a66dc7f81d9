//! Captured review records for the operator inbox.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BusinessId, Rating, ReviewId, Timestamp};
use crate::domain::routing::Platform;

/// Private/public classification of a captured review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// One captured review as shown in the operator inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub business_id: BusinessId,
    pub reviewer_name: String,
    pub rating: Rating,
    pub text: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub created_at: Timestamp,
    /// AI-drafted reply, present once the operator has generated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_draft: Option<String>,
    pub resolved: bool,
}

impl Review {
    /// True for reviews the escalation/attention filters should surface.
    pub fn needs_attention(&self) -> bool {
        !self.resolved && (self.visibility == Visibility::Private || self.rating.is_detractor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Rating, visibility: Visibility, resolved: bool) -> Review {
        Review {
            id: ReviewId::new(),
            business_id: BusinessId::new("merlin-cambridge-001").unwrap(),
            reviewer_name: "Sarah".to_string(),
            rating,
            text: "Test".to_string(),
            visibility,
            platform: Some(Platform::Google),
            created_at: Timestamp::now(),
            ai_draft: None,
            resolved,
        }
    }

    #[test]
    fn unresolved_private_reviews_need_attention() {
        assert!(review(Rating::Five, Visibility::Private, false).needs_attention());
    }

    #[test]
    fn unresolved_detractor_reviews_need_attention() {
        assert!(review(Rating::Two, Visibility::Public, false).needs_attention());
    }

    #[test]
    fn resolved_reviews_never_need_attention() {
        assert!(!review(Rating::One, Visibility::Private, true).needs_attention());
    }

    #[test]
    fn happy_public_reviews_do_not_need_attention() {
        assert!(!review(Rating::Five, Visibility::Public, false).needs_attention());
    }
}

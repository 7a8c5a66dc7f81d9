//! Review inbox port - read side of the operator dashboard.

use async_trait::async_trait;

use crate::domain::foundation::{BusinessId, DomainError, ReviewId};
use crate::domain::review::Review;

/// Query and draft-annotation operations over captured reviews.
///
/// Reviews are seeded data in this deployment; the port keeps the dashboard
/// decoupled from wherever they eventually live.
#[async_trait]
pub trait ReviewInbox: Send + Sync {
    /// All reviews for one business, newest first.
    async fn list_for_business(&self, id: &BusinessId) -> Result<Vec<Review>, DomainError>;

    /// One review by id, `None` if absent.
    async fn find(
        &self,
        id: &BusinessId,
        review_id: &ReviewId,
    ) -> Result<Option<Review>, DomainError>;

    /// Attaches (or overwrites) the AI-drafted reply on a review.
    async fn save_draft(
        &self,
        id: &BusinessId,
        review_id: &ReviewId,
        draft: String,
    ) -> Result<(), DomainError>;
}

//! ListReviewsHandler - inbox listing with visibility/platform filters.

use std::sync::Arc;

use crate::domain::foundation::BusinessId;
use crate::domain::review::{Review, Visibility};
use crate::domain::routing::Platform;
use crate::ports::{ReviewInbox, TenantResolver};

use super::DashboardHandlerError;

/// Query for the review inbox.
#[derive(Debug, Clone)]
pub struct ListReviewsQuery {
    pub business_id: BusinessId,
    pub visibility: Option<Visibility>,
    pub platform: Option<Platform>,
}

/// Handler listing captured reviews.
pub struct ListReviewsHandler {
    resolver: Arc<dyn TenantResolver>,
    inbox: Arc<dyn ReviewInbox>,
}

impl ListReviewsHandler {
    pub fn new(resolver: Arc<dyn TenantResolver>, inbox: Arc<dyn ReviewInbox>) -> Self {
        Self { resolver, inbox }
    }

    pub async fn handle(
        &self,
        query: ListReviewsQuery,
    ) -> Result<Vec<Review>, DashboardHandlerError> {
        self.resolver.resolve(&query.business_id).await?;

        let mut reviews = self.inbox.list_for_business(&query.business_id).await?;

        if let Some(visibility) = query.visibility {
            reviews.retain(|r| r.visibility == visibility);
        }
        if let Some(platform) = query.platform {
            reviews.retain(|r| r.platform == Some(platform));
        }

        Ok(reviews)
    }
}

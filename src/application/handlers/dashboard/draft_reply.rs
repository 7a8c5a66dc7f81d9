//! DraftReplyHandler - AI-drafted reply for one inbox review.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{BusinessId, ReviewId};
use crate::ports::{AiOrchestrator, AiText, ReviewInbox, TenantResolver};

use super::DashboardHandlerError;

/// Command to draft a reply for a review.
#[derive(Debug, Clone)]
pub struct DraftReplyCommand {
    pub business_id: BusinessId,
    pub review_id: ReviewId,
}

/// Result of draft generation.
#[derive(Debug, Clone)]
pub struct DraftReplyResult {
    pub draft: String,
    /// True when the draft is the fallback text rather than a generation.
    pub degraded: bool,
}

/// Handler generating and storing reply drafts.
pub struct DraftReplyHandler {
    resolver: Arc<dyn TenantResolver>,
    inbox: Arc<dyn ReviewInbox>,
    ai: Arc<dyn AiOrchestrator>,
}

impl DraftReplyHandler {
    pub fn new(
        resolver: Arc<dyn TenantResolver>,
        inbox: Arc<dyn ReviewInbox>,
        ai: Arc<dyn AiOrchestrator>,
    ) -> Self {
        Self { resolver, inbox, ai }
    }

    pub async fn handle(
        &self,
        cmd: DraftReplyCommand,
    ) -> Result<DraftReplyResult, DashboardHandlerError> {
        let business = self.resolver.resolve(&cmd.business_id).await?;

        let review = self
            .inbox
            .find(&cmd.business_id, &cmd.review_id)
            .await?
            .ok_or(DashboardHandlerError::ReviewNotFound(cmd.review_id))?;

        let reply = self
            .ai
            .draft_reply(&review.text, review.rating, &business.name)
            .await;

        if let AiText::Degraded { reason, .. } = &reply {
            warn!(review_id = %cmd.review_id, reason = %reason, "draft degraded to fallback");
        }

        let draft = reply.text().to_string();
        // Repeat calls overwrite the stored draft; the trigger control is
        // disabled client-side while a request is pending.
        self.inbox
            .save_draft(&cmd.business_id, &cmd.review_id, draft.clone())
            .await?;

        Ok(DraftReplyResult {
            draft,
            degraded: reply.is_degraded(),
        })
    }
}

//! GetFunnelStateHandler - read-only recovery view for a reloading client.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::BusinessId;
use crate::domain::funnel::FunnelSession;
use crate::ports::{SessionStore, TenantResolver};

use super::FunnelHandlerError;

/// Query for the current persisted-recovery view.
#[derive(Debug, Clone)]
pub struct GetFunnelStateQuery {
    pub business_id: BusinessId,
}

/// Handler returning the session a reload would recover into.
pub struct GetFunnelStateHandler {
    resolver: Arc<dyn TenantResolver>,
    store: Arc<dyn SessionStore>,
}

impl GetFunnelStateHandler {
    pub fn new(resolver: Arc<dyn TenantResolver>, store: Arc<dyn SessionStore>) -> Self {
        Self { resolver, store }
    }

    pub async fn handle(
        &self,
        query: GetFunnelStateQuery,
    ) -> Result<FunnelSession, FunnelHandlerError> {
        // Resolution failure is still surfaced; storage trouble is not.
        self.resolver.resolve(&query.business_id).await?;

        let record = match self.store.get(&query.business_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(business_id = %query.business_id, error = %e, "state read failed");
                None
            }
        };

        Ok(match record {
            Some(record) => FunnelSession::recover(query.business_id, &record),
            None => FunnelSession::new(query.business_id),
        })
    }
}

//! StartFunnelHandler - resolves the tenant and recovers any in-progress
//! session.
//!
//! Recovery runs here, once per funnel mount, never on individual
//! transitions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::BusinessId;
use crate::domain::funnel::FunnelSession;
use crate::ports::{SessionStore, TenantResolver};

use super::FunnelHandlerError;

/// Command to open the funnel from an inbound link.
#[derive(Debug, Clone)]
pub struct StartFunnelCommand {
    /// Raw identifier from the link query parameter, unsanitized.
    pub raw_business_id: String,
}

/// Result of a successful funnel start.
#[derive(Debug, Clone)]
pub struct StartFunnelResult {
    pub business: BusinessProfile,
    pub session: FunnelSession,
    /// True when the session was recovered from a persisted record rather
    /// than started fresh.
    pub recovered: bool,
}

/// Handler for opening the funnel.
pub struct StartFunnelHandler {
    resolver: Arc<dyn TenantResolver>,
    store: Arc<dyn SessionStore>,
}

impl StartFunnelHandler {
    pub fn new(resolver: Arc<dyn TenantResolver>, store: Arc<dyn SessionStore>) -> Self {
        Self { resolver, store }
    }

    pub async fn handle(
        &self,
        cmd: StartFunnelCommand,
    ) -> Result<StartFunnelResult, FunnelHandlerError> {
        // 1. Sanitize and resolve the tenant
        let business_id = BusinessId::sanitize(&cmd.raw_business_id)?;
        let business = self.resolver.resolve(&business_id).await?;

        // 2. Attempt session recovery; storage trouble means a fresh start,
        //    never an error to the reviewer.
        let record = match self.store.get(&business_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(business_id = %business_id, error = %e, "session recovery failed, starting fresh");
                None
            }
        };

        let (session, recovered) = match record {
            Some(record) => {
                let session = FunnelSession::recover(business_id.clone(), &record);
                info!(business_id = %business_id, step = %session.step, "recovered funnel session");
                (session, true)
            }
            None => (FunnelSession::new(business_id), false),
        };

        Ok(StartFunnelResult {
            business,
            session,
            recovered,
        })
    }
}

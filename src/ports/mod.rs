//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - persistence for in-progress funnel sessions
//! - `TenantResolver` - business directory lookup
//! - `AiOrchestrator` - draft/insight generation, grounded lookups
//! - `ReviewInbox` - read side of the operator dashboard

mod ai_insights;
mod review_inbox;
mod session_store;
mod tenant_resolver;

pub use ai_insights::{
    AiOrchestrator, AiText, GroundedAnswer, GroundingSource, ReviewDigest, DRAFT_FALLBACK,
    FALLBACK_COORDS, INSIGHTS_FALLBACK, LOCAL_DEGRADED, TRENDS_DEGRADED,
};
pub use review_inbox::ReviewInbox;
pub use session_store::{session_key, SessionStore, SessionStoreError, SESSION_KEY_PREFIX};
pub use tenant_resolver::{ResolveError, TenantResolver};

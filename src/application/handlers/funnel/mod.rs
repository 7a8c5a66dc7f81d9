//! Funnel command/query handlers.

mod apply_event;
mod get_state;
mod start_funnel;

pub use apply_event::{ApplyEventCommand, ApplyEventHandler, EventOutcome};
pub use get_state::{GetFunnelStateHandler, GetFunnelStateQuery};
pub use start_funnel::{StartFunnelCommand, StartFunnelHandler, StartFunnelResult};

use crate::domain::foundation::ValidationError;
use crate::domain::funnel::FunnelError;
use crate::ports::ResolveError;

/// Errors surfaced by funnel handlers.
#[derive(Debug, thiserror::Error)]
pub enum FunnelHandlerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Funnel(#[from] FunnelError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

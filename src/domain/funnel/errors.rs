//! Error types for the funnel module.

use thiserror::Error;

use super::FunnelStep;
use crate::domain::foundation::{BusinessId, ValidationError};

/// Errors raised by the funnel reducer and its orchestration.
#[derive(Debug, Clone, Error)]
pub enum FunnelError {
    /// The event is not accepted in the session's current step.
    #[error("Event '{event}' is not valid in step '{step}'")]
    InvalidTransition { step: FunnelStep, event: &'static str },

    /// A gating predicate failed; the transition stays unreachable.
    #[error("Guard not satisfied: {reason}")]
    GuardNotSatisfied { reason: String },

    /// A submission is already in flight for this business.
    #[error("A submission is already in flight for business '{0}'")]
    SubmissionInFlight(BusinessId),

    /// Value object construction failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FunnelError {
    pub fn invalid_transition(step: FunnelStep, event: &'static str) -> Self {
        FunnelError::InvalidTransition { step, event }
    }

    pub fn guard(reason: impl Into<String>) -> Self {
        FunnelError::GuardNotSatisfied { reason: reason.into() }
    }
}

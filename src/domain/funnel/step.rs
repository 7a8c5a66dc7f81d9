//! Funnel step state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The ordered steps of the review funnel.
///
/// `Landing` is initial; `ThankYou` ends the happy path (a reviewer can
/// only leave it by restarting with a fresh session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunnelStep {
    Landing,
    Rating,
    Feedback,
    PlatformSelect,
    ThankYou,
}

impl StateMachine for FunnelStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FunnelStep::*;
        matches!(
            (self, target),
            // Forward path
            (Landing, Rating)
                | (Rating, Feedback)
                | (Feedback, PlatformSelect)
                | (PlatformSelect, ThankYou)
                // Back navigation
                | (Rating, Landing)
                | (Feedback, Rating)
                | (PlatformSelect, Feedback)
                // Restart
                | (ThankYou, Landing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FunnelStep::*;
        match self {
            Landing => vec![Rating],
            Rating => vec![Feedback, Landing],
            Feedback => vec![PlatformSelect, Rating],
            PlatformSelect => vec![ThankYou, Feedback],
            ThankYou => vec![Landing],
        }
    }
}

impl FunnelStep {
    /// The step back navigation returns to, when any.
    pub fn back_target(&self) -> Option<FunnelStep> {
        match self {
            FunnelStep::Rating => Some(FunnelStep::Landing),
            FunnelStep::Feedback => Some(FunnelStep::Rating),
            FunnelStep::PlatformSelect => Some(FunnelStep::Feedback),
            FunnelStep::Landing | FunnelStep::ThankYou => None,
        }
    }
}

impl fmt::Display for FunnelStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FunnelStep::Landing => "landing",
            FunnelStep::Rating => "rating",
            FunnelStep::Feedback => "feedback",
            FunnelStep::PlatformSelect => "platform-select",
            FunnelStep::ThankYou => "thank-you",
        };
        write!(f, "{}", s)
    }
}

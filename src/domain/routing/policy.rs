//! Reputation routing policy.
//!
//! Decides whether a finished submission stays private or is forwarded to
//! the public platform the reviewer picked.

use serde::Serialize;

use super::Platform;
use crate::domain::foundation::Rating;

/// The private/public disposition of one submission, derived at submit time
/// and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    /// True when the submission is kept internal.
    pub is_private: bool,
    /// External redirect target; present only for public dispositions whose
    /// destination has a known URL template.
    pub target_url: Option<String>,
    /// True when the thank-you screen should offer the manager escalation
    /// action.
    pub escalation_eligible: bool,
}

/// Sentiment-based routing rules.
pub struct RoutingPolicy;

impl RoutingPolicy {
    /// Classifies a submission and computes its redirect target.
    ///
    /// Detractor ratings are always kept private, even when the reviewer
    /// explicitly picked a public platform. This overrides the reviewer's
    /// choice on purpose: negative sentiment is never forwarded to a public
    /// platform.
    pub fn decide(rating: Rating, destination: Platform, business_name: &str) -> RoutingDecision {
        let is_private = destination.is_internal() || rating.is_detractor();

        let target_url = if is_private {
            None
        } else {
            destination.search_url(business_name)
        };

        RoutingDecision {
            is_private,
            target_url,
            escalation_eligible: is_private,
        }
    }

    /// True when the platform-select screen should warn that a private sync
    /// is recommended for the chosen rating.
    pub fn privacy_shield_active(rating: Rating) -> bool {
        rating.is_detractor()
    }
}

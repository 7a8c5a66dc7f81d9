//! Funnel session state and its persisted record shape.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::FunnelStep;
use crate::domain::foundation::{BusinessId, Rating, Timestamp};
use crate::domain::routing::Platform;

/// The persisted recovery record for one in-progress submission.
///
/// Wire shape is fixed: `{ rating, comment, timestamp, businessId }` with
/// `rating` 0 meaning unset and `timestamp` in epoch milliseconds. Records
/// older than the expiry window are treated as absent on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub rating: u8,
    pub comment: String,
    pub timestamp: Timestamp,
    pub business_id: String,
}

impl SessionRecord {
    /// True when the record is older than `max_age` at `now`.
    pub fn is_expired(&self, now: &Timestamp, max_age: Duration) -> bool {
        self.timestamp.age(now) > max_age
    }

    /// The step a recovered session resumes at.
    ///
    /// Pure function of (rating, comment): both set resumes at
    /// platform-select, rating alone at feedback, anything else starts over
    /// at landing. Already-completed steps are never replayed.
    pub fn resume_step(&self) -> FunnelStep {
        if self.rating > 0 && !self.comment.is_empty() {
            FunnelStep::PlatformSelect
        } else if self.rating > 0 {
            FunnelStep::Feedback
        } else {
            FunnelStep::Landing
        }
    }
}

/// The mutable state of one in-progress feedback submission, scoped to
/// exactly one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelSession {
    /// Owning business.
    pub business_id: BusinessId,
    /// Current funnel step.
    pub step: FunnelStep,
    /// Chosen rating, unset until the rating step completes.
    pub rating: Option<Rating>,
    /// Free-text feedback, initially empty.
    pub comment: String,
    /// Destination picked on the platform-select step.
    pub selected_destination: Option<Platform>,
    /// Set the first time rating or comment becomes non-empty.
    pub started_at: Option<Timestamp>,
}

impl FunnelSession {
    /// Creates a fresh session at the landing step.
    pub fn new(business_id: BusinessId) -> Self {
        Self {
            business_id,
            step: FunnelStep::Landing,
            rating: None,
            comment: String::new(),
            selected_destination: None,
            started_at: None,
        }
    }

    /// Restores a session from a persisted record, resuming at the step
    /// implied by the record's rating/comment fullness.
    pub fn recover(business_id: BusinessId, record: &SessionRecord) -> Self {
        Self {
            business_id,
            step: record.resume_step(),
            rating: Rating::try_from_u8(record.rating).ok(),
            comment: record.comment.clone(),
            selected_destination: None,
            started_at: Some(record.timestamp),
        }
    }

    /// True once rating or comment holds anything worth persisting.
    pub fn has_progress(&self) -> bool {
        self.rating.is_some() || !self.comment.is_empty()
    }

    /// True when the feedback step's confirm guard is satisfied.
    pub fn comment_confirmable(&self) -> bool {
        self.comment.trim().chars().count() >= 2
    }

    /// Builds the persistence record with a fresh timestamp.
    ///
    /// Returns `None` for an untouched session: empty sessions are never
    /// written, avoiding spurious storage growth.
    pub fn record(&self, now: Timestamp) -> Option<SessionRecord> {
        if !self.has_progress() {
            return None;
        }
        Some(SessionRecord {
            rating: self.rating.map(|r| r.value()).unwrap_or(0),
            comment: self.comment.clone(),
            timestamp: now,
            business_id: self.business_id.to_string(),
        })
    }
}

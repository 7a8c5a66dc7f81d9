//! Manager escalation message composition.
//!
//! Escalation is a manual, user-triggered notification to the business
//! operator about a private or low-rating submission. The core composes the
//! message and the outbound link; dispatch is fire-and-forget at the edge.

use serde::Serialize;

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::Rating;

/// A composed escalation, ready to hand to the messaging endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Escalation {
    /// Human-readable message embedding rating and comment.
    pub message: String,
    /// wa.me deep link addressed to the business's contact number.
    pub link: String,
}

impl Escalation {
    /// Composes the escalation for one finished submission.
    pub fn compose(business: &BusinessProfile, rating: Rating, comment: &str) -> Self {
        let message = format!(
            "Urgent Interaction Escalation: {}\u{2605} at {}. Feedback: \"{}\"",
            rating.value(),
            business.name,
            comment
        );
        let link = format!(
            "https://wa.me/{}?text={}",
            business.whatsapp_number,
            urlencoding::encode(&message)
        );
        Self { message, link }
    }
}

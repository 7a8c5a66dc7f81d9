//! Registry adapters - seeded tenant directory and review inbox.

mod seeded_review_inbox;
mod static_registry;

pub use seeded_review_inbox::SeededReviewInbox;
pub use static_registry::StaticRegistry;

//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the ReviewMaster domain.

mod errors;
mod ids;
mod rating;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BusinessId, ReviewId};
pub use rating::{Rating, DETRACTOR_THRESHOLD};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

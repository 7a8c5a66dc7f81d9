//! Rating value object for the 1-5 star scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Star rating: 1 (critical) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rating {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

/// Ratings at or below this value are routed privately.
pub const DETRACTOR_THRESHOLD: u8 = 3;

impl Rating {
    /// Creates a Rating from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Rating::One),
            2 => Ok(Rating::Two),
            3 => Ok(Rating::Three),
            4 => Ok(Rating::Four),
            5 => Ok(Rating::Five),
            _ => Err(ValidationError::out_of_range("rating", 1, 5, value as i32)),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns true when this rating must be kept off public platforms.
    pub fn is_detractor(&self) -> bool {
        self.value() <= DETRACTOR_THRESHOLD
    }

    /// Returns true for ratings eligible for public syndication.
    pub fn is_promoter(&self) -> bool {
        !self.is_detractor()
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::One => "Critical Alert",
            Rating::Two => "Below Threshold",
            Rating::Three => "System Baseline",
            Rating::Four => "Above Standard",
            Rating::Five => "Excellence Achieved",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

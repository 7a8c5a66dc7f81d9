//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier for a business tenant, as carried in shareable funnel links.
///
/// Inbound identifiers arrive from an untrusted query string, so construction
/// strips everything outside `[A-Za-z0-9_-]` before the value is used as a
/// registry key or a storage key suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(String);

impl BusinessId {
    /// Creates a BusinessId from a trusted string (registry seeds, tests).
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is empty
    /// - `InvalidFormat` if the value contains characters outside `[A-Za-z0-9_-]`
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("business_id"));
        }
        if !value.chars().all(Self::is_allowed_char) {
            return Err(ValidationError::invalid_format(
                "business_id",
                "only alphanumerics, hyphens and underscores are allowed",
            ));
        }
        Ok(Self(value))
    }

    /// Sanitizes an untrusted inbound identifier by dropping disallowed
    /// characters, then constructs the id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if nothing survives sanitization
    pub fn sanitize(raw: &str) -> Result<Self, ValidationError> {
        let cleaned: String = raw.chars().filter(|c| Self::is_allowed_char(*c)).collect();
        if cleaned.is_empty() {
            return Err(ValidationError::empty_field("business_id"));
        }
        Ok(Self(cleaned))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }
}

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BusinessId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for a captured review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Creates a new random ReviewId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ReviewId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

//! Shared HTTP error body.

use serde::Serialize;

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("{} '{}' not found", kind, id),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            error: "conflict".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal".to_string(),
            message: message.into(),
        }
    }
}

//! Review destination platforms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A destination a reviewer can sync feedback toward.
///
/// `InternalOnly` keeps the submission inside the business; every other
/// variant names a public review platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Google,
    Zomato,
    Facebook,
    Swiggy,
    Yelp,
    Tripadvisor,
    Justdial,
    InternalOnly,
}

impl Platform {
    /// Returns true for the manager-only destination.
    pub fn is_internal(&self) -> bool {
        matches!(self, Platform::InternalOnly)
    }

    /// Builds the public search URL for this destination, embedding the
    /// business name.
    ///
    /// Returns `None` for destinations without a known URL template; the
    /// submission still proceeds, there is just nothing to open.
    pub fn search_url(&self, business_name: &str) -> Option<String> {
        let encoded = urlencoding::encode(business_name);
        match self {
            Platform::Google => Some(format!(
                "https://www.google.com/search?q={}+reviews",
                encoded
            )),
            Platform::Zomato => Some(format!("https://www.zomato.com/search?q={}", encoded)),
            Platform::Facebook => Some(format!(
                "https://www.facebook.com/search/pages/?q={}",
                encoded
            )),
            Platform::Justdial => Some(format!("https://www.justdial.com/search?q={}", encoded)),
            Platform::Swiggy
            | Platform::Yelp
            | Platform::Tripadvisor
            | Platform::InternalOnly => None,
        }
    }

    /// Display label for operator-facing surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Google => "Google",
            Platform::Zomato => "Zomato",
            Platform::Facebook => "Facebook",
            Platform::Swiggy => "Swiggy",
            Platform::Yelp => "Yelp",
            Platform::Tripadvisor => "TripAdvisor",
            Platform::Justdial => "JustDial",
            Platform::InternalOnly => "Private",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

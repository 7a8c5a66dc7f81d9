//! Business profile read model.
//!
//! Supplied by the tenant resolver at funnel start and immutable for the
//! duration of a funnel session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::BusinessId;
use crate::domain::routing::Platform;

/// Subscription tier for a business tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Pro,
}

/// Role of a team member within a business account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Admin,
    Editor,
    Viewer,
}

/// Presence of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Online,
    Offline,
    Invited,
}

/// A member of the business's operator team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: TeamRole,
    pub status: MemberStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Identity record for one business tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Unique identifier, used as the funnel link parameter.
    pub id: BusinessId,
    /// Display name, embedded in redirect URLs and escalation messages.
    pub name: String,
    /// Account owner.
    pub owner_name: String,
    /// Contact email.
    pub email: String,
    /// WhatsApp number the escalation message is addressed to.
    pub whatsapp_number: String,
    /// Subscription tier.
    pub plan: Plan,
    /// Platforms enabled for public syndication.
    pub platforms: Vec<Platform>,
    /// Operator team (not used by the funnel core).
    pub team: Vec<TeamMember>,
}

impl BusinessProfile {
    /// Returns true when the given platform is enabled for this business.
    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

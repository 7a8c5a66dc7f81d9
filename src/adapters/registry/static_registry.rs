//! Static Tenant Registry Adapter
//!
//! Seeded, read-only business directory standing in for a real tenant
//! database. Lookup is by sanitized identifier; unknown identifiers resolve
//! to `NotFound`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::business::{BusinessProfile, MemberStatus, Plan, TeamMember, TeamRole};
use crate::domain::foundation::BusinessId;
use crate::domain::routing::Platform;
use crate::ports::{ResolveError, TenantResolver};

static BUSINESS_REGISTRY: Lazy<HashMap<&'static str, BusinessProfile>> = Lazy::new(|| {
    let mut registry = HashMap::new();

    registry.insert(
        "merlin-cambridge-001",
        BusinessProfile {
            id: BusinessId::new("merlin-cambridge-001").expect("seed id"),
            name: "Merlin Cambridge".to_string(),
            owner_name: "Alex Johnson".to_string(),
            email: "admin@merlin-hospitality.com".to_string(),
            whatsapp_number: "919876543210".to_string(),
            plan: Plan::Pro,
            platforms: vec![
                Platform::Google,
                Platform::Facebook,
                Platform::Zomato,
                Platform::Swiggy,
                Platform::Justdial,
            ],
            team: vec![
                TeamMember {
                    id: "1".to_string(),
                    name: "Sarah".to_string(),
                    role: TeamRole::Editor,
                    status: MemberStatus::Online,
                    avatar: None,
                },
                TeamMember {
                    id: "2".to_string(),
                    name: "Mike".to_string(),
                    role: TeamRole::Viewer,
                    status: MemberStatus::Online,
                    avatar: None,
                },
            ],
        },
    );

    registry.insert(
        "crystal-lounge-002",
        BusinessProfile {
            id: BusinessId::new("crystal-lounge-002").expect("seed id"),
            name: "Crystal Lounge".to_string(),
            owner_name: "Elena Ross".to_string(),
            email: "hello@crystallounge.res".to_string(),
            whatsapp_number: "447890123456".to_string(),
            plan: Plan::Pro,
            platforms: vec![
                Platform::Google,
                Platform::Yelp,
                Platform::Tripadvisor,
                Platform::Facebook,
            ],
            team: vec![TeamMember {
                id: "1".to_string(),
                name: "James".to_string(),
                role: TeamRole::Admin,
                status: MemberStatus::Online,
                avatar: None,
            }],
        },
    );

    registry
});

/// Seeded tenant directory.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry;

impl StaticRegistry {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TenantResolver for StaticRegistry {
    async fn resolve(&self, id: &BusinessId) -> Result<BusinessProfile, ResolveError> {
        BUSINESS_REGISTRY
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(id.clone()))
    }
}

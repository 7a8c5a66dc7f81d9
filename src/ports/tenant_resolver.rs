//! Tenant resolver port - maps inbound link identifiers to business profiles.

use async_trait::async_trait;

use crate::domain::business::BusinessProfile;
use crate::domain::foundation::BusinessId;

/// Errors from tenant resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// The identifier is not present in the directory. Fatal to the current
    /// navigation; the client renders the full-screen error state with a
    /// restart action.
    #[error("Business node [{0}] not found in the registry")]
    NotFound(BusinessId),
}

/// Read-only lookup of business profiles by identifier.
#[async_trait]
pub trait TenantResolver: Send + Sync {
    /// Resolves a (pre-sanitized) identifier to its business profile.
    async fn resolve(&self, id: &BusinessId) -> Result<BusinessProfile, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_resolver_is_object_safe() {
        fn _accepts_dyn(_resolver: &dyn TenantResolver) {}
    }

    #[test]
    fn not_found_names_the_identifier() {
        let err = ResolveError::NotFound(BusinessId::new("ghost-biz").unwrap());
        assert_eq!(
            err.to_string(),
            "Business node [ghost-biz] not found in the registry"
        );
    }
}

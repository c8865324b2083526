//! Authenticated principal built from a claims identity.

use tokenward_core::types::{TenantId, UserId};

use crate::jwt::identity::{ClaimsIdentity, claim_types};

/// The caller as seen by the rest of the application.
///
/// Authenticated iff its identity carries any claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedUserPrincipal {
    identity: ClaimsIdentity,
}

impl AuthenticatedUserPrincipal {
    /// Wraps `identity`.
    pub fn new(identity: ClaimsIdentity) -> Self {
        Self { identity }
    }

    /// The unauthenticated principal.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether the identity carries any claims.
    pub fn is_authenticated(&self) -> bool {
        !self.identity.is_empty()
    }

    /// The underlying claims identity.
    pub fn identity(&self) -> &ClaimsIdentity {
        &self.identity
    }

    /// User id from the identity; `None` when absent or not a UUID.
    pub fn user_id(&self) -> Option<UserId> {
        self.identity
            .find_first(claim_types::USER_ID)
            .and_then(|v| v.parse().ok())
    }

    /// User name claim.
    pub fn user_name(&self) -> Option<&str> {
        self.identity.find_first(claim_types::USER_NAME)
    }

    /// Tenant id from the identity; `None` when absent or not a UUID.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.identity
            .find_first(claim_types::TENANT_ID)
            .and_then(|v| v.parse().ok())
    }

    /// Tenant name claim.
    pub fn tenant_name(&self) -> Option<&str> {
        self.identity.find_first(claim_types::TENANT_NAME)
    }
}

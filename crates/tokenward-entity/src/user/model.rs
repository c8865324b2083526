//! Application user model.

use serde::{Deserialize, Serialize};

use tokenward_core::types::{TenantId, UserId};

/// A user as known to the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Tenant the user belongs to, if any.
    pub tenant_id: Option<TenantId>,
    /// Display name of the tenant.
    pub tenant_name: Option<String>,
    /// Whether the account may sign in.
    pub is_active: bool,
}

impl ApplicationUser {
    /// Create an active user with a fresh identifier.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            tenant_id: None,
            tenant_name: None,
            is_active: true,
        }
    }

    /// Assign the user to a tenant.
    pub fn with_tenant(mut self, tenant_id: TenantId, tenant_name: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id);
        self.tenant_name = Some(tenant_name.into());
        self
    }

    /// Override the generated identifier.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tenant_sets_both_fields() {
        let tenant = TenantId::new();
        let user = ApplicationUser::new("alice").with_tenant(tenant, "Acme");
        assert_eq!(user.tenant_id, Some(tenant));
        assert_eq!(user.tenant_name.as_deref(), Some("Acme"));
        assert!(user.is_active);
    }

    #[test]
    fn test_with_id_overrides_generated_id() {
        let id = UserId::new();
        let user = ApplicationUser::new("alice").with_id(id);
        assert_eq!(user.id, id);
    }
}

//! Binds an authenticated identity into the session context.

use std::sync::Arc;

use tracing::debug;

use tokenward_entity::user::ApplicationUser;

use super::principal::AuthenticatedUserPrincipal;
use super::state::{ContextSnapshot, SessionContext};
use crate::jwt::identity::ClaimsIdentity;

/// Writes tenant and current-user context for one session.
#[derive(Debug, Clone)]
pub struct IdentityContextBinder {
    context: Arc<SessionContext>,
}

impl IdentityContextBinder {
    /// Creates a binder writing to `context`.
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }

    /// The context this binder writes to.
    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    /// Binds a validated identity and returns the matching principal.
    ///
    /// Every field, tenant name included, is taken from `identity`; nothing
    /// is carried over from the previous binding.
    pub fn bind_from_claims(&self, identity: ClaimsIdentity) -> AuthenticatedUserPrincipal {
        let principal = AuthenticatedUserPrincipal::new(identity);

        self.context.replace(ContextSnapshot::bound(
            principal.user_id(),
            principal.user_name().map(str::to_owned),
            principal.tenant_id(),
            principal.tenant_name().map(str::to_owned),
        ));

        debug!(
            user_id = ?principal.user_id(),
            tenant_id = ?principal.tenant_id(),
            "Bound session context from claims"
        );
        principal
    }

    /// Binds straight from a user record, as done on login.
    pub fn bind_from_user(&self, user: &ApplicationUser) {
        self.context.replace(ContextSnapshot::bound(
            Some(user.id),
            Some(user.username.clone()),
            user.tenant_id,
            user.tenant_name.clone(),
        ));

        debug!(user_id = %user.id, tenant_id = ?user.tenant_id, "Bound session context from user");
    }
}

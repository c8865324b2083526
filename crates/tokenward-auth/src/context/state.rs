//! Session context state.
//!
//! Tenant and current-user context live behind one lock and are only ever
//! replaced together, so a reader sees either the previous binding or the
//! new one in full.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use tokenward_core::types::{TenantId, UserId};

tokio::task_local! {
    static CURRENT: Arc<SessionContext>;
}

/// The tenant the session acts on behalf of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Tenant identifier.
    pub tenant_id: Option<TenantId>,
    /// Tenant display name.
    pub tenant_name: Option<String>,
}

/// The user the session is authenticated as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserContext {
    /// User identifier.
    pub user_id: Option<UserId>,
    /// Username.
    pub user_name: Option<String>,
    /// Tenant identifier of the user.
    pub tenant_id: Option<TenantId>,
    /// Tenant display name of the user.
    pub tenant_name: Option<String>,
}

/// Both contexts as observed at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Tenant context.
    pub tenant: TenantContext,
    /// Current-user context.
    pub user: CurrentUserContext,
}

impl ContextSnapshot {
    /// Builds a snapshot where both contexts agree on the tenant.
    pub fn bound(
        user_id: Option<UserId>,
        user_name: Option<String>,
        tenant_id: Option<TenantId>,
        tenant_name: Option<String>,
    ) -> Self {
        Self {
            tenant: TenantContext {
                tenant_id,
                tenant_name: tenant_name.clone(),
            },
            user: CurrentUserContext {
                user_id,
                user_name,
                tenant_id,
                tenant_name,
            },
        }
    }
}

/// Session-scoped holder for [`TenantContext`] and [`CurrentUserContext`].
///
/// One instance per session; share it with `Arc`. Within a task, the
/// instance can be made ambient with [`SessionContext::scope`] and read back
/// with [`SessionContext::try_current`].
#[derive(Debug, Default)]
pub struct SessionContext {
    state: RwLock<ContextSnapshot>,
}

impl SessionContext {
    /// Creates an empty (unbound) context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tenant context.
    pub fn tenant(&self) -> TenantContext {
        self.state.read().tenant.clone()
    }

    /// Current user context.
    pub fn current_user(&self) -> CurrentUserContext {
        self.state.read().user.clone()
    }

    /// Both contexts under a single read.
    pub fn snapshot(&self) -> ContextSnapshot {
        self.state.read().clone()
    }

    /// `true` once a user has been bound.
    pub fn is_bound(&self) -> bool {
        self.state.read().user.user_id.is_some()
    }

    /// Resets both contexts to empty.
    pub fn clear(&self) {
        *self.state.write() = ContextSnapshot::default();
    }

    pub(crate) fn replace(&self, snapshot: ContextSnapshot) {
        *self.state.write() = snapshot;
    }

    /// Runs `fut` with `self` as the task's ambient session context.
    pub async fn scope<F>(self: Arc<Self>, fut: F) -> F::Output
    where
        F: Future,
    {
        CURRENT.scope(self, fut).await
    }

    /// The ambient session context, if called inside [`scope`](Self::scope).
    pub fn try_current() -> Option<Arc<SessionContext>> {
        CURRENT.try_with(Arc::clone).ok()
    }
}

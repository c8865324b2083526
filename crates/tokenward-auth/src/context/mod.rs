//! Per-session tenant and current-user context.

pub mod binder;
pub mod principal;
pub mod state;

pub use binder::IdentityContextBinder;
pub use principal::AuthenticatedUserPrincipal;
pub use state::{ContextSnapshot, CurrentUserContext, SessionContext, TenantContext};

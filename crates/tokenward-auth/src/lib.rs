//! # tokenward-auth
//!
//! Session token lifecycle management for Tokenward.
//!
//! ## Modules
//!
//! - `jwt`: claims, claims identity, HS256 token issuance and validation
//! - `storage`: session-scoped, AES-GCM protected persistence of the token pair
//! - `context`: tenant and current-user context plus the binder that fills it
//! - `directory`: user lookup by id
//! - `session`: the lifecycle manager tying the above together

pub mod context;
pub mod directory;
pub mod jwt;
pub mod session;
pub mod storage;

pub use context::{
    AuthenticatedUserPrincipal, CurrentUserContext, IdentityContextBinder, SessionContext,
    TenantContext,
};
pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use jwt::{
    Claims, ClaimsIdentity, JwtDecoder, JwtEncoder, TokenGenerator, TokenRejection,
    TokenValidation, TokenValidator,
};
pub use session::{LoginService, SessionTokenManager};
pub use storage::{PayloadCipher, ProtectedTokenStorage, TokenStorage};

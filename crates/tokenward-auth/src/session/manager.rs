//! Session token lifecycle manager.
//!
//! One [`SessionTokenManager`] serves one session. It persists the token
//! pair issued on login, resolves the current principal from storage by
//! validating the access token and falling back to the refresh token, and
//! issues new access tokens from a refresh token.
//!
//! Principal resolution never fails. Errors are sorted into three classes:
//!
//! 1. an ordinary invalid token moves on to the next token, then to anonymous;
//! 2. a cryptographic fault removes the stored pair, then anonymous;
//! 3. any other fault is logged and gives anonymous, leaving storage alone.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tokenward_core::config::AuthConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;
use tokenward_entity::user::ApplicationUser;

use crate::context::{AuthenticatedUserPrincipal, IdentityContextBinder, SessionContext};
use crate::directory::UserDirectory;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenGenerator, TokenValidation, TokenValidator};
use crate::storage::TokenStorage;

use super::login::LoginService;

/// Storage key of the token pair.
pub const STORAGE_KEY: &str = "auth_token";

/// Manages the token pair and identity binding of a single session.
///
/// Mutating operations take `&mut self`; a session owns its manager and
/// calls are serialized by construction.
pub struct SessionTokenManager {
    /// Session-scoped token pair storage.
    storage: Arc<dyn TokenStorage>,
    /// Issues the pair on login.
    login_service: Arc<dyn LoginService>,
    /// Validates access tokens.
    access_validator: Arc<dyn TokenValidator>,
    /// Validates refresh tokens.
    refresh_validator: Arc<dyn TokenValidator>,
    /// Issues access tokens on refresh.
    token_generator: Arc<dyn TokenGenerator>,
    /// User lookup for refresh.
    user_directory: Arc<dyn UserDirectory>,
    /// Writes tenant and user context.
    binder: IdentityContextBinder,
    /// Access token last read from or written to storage.
    access_token: Option<String>,
    /// Refresh token last read from or written to storage.
    refresh_token: Option<String>,
}

impl std::fmt::Debug for SessionTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenManager")
            .field("has_access_token", &self.access_token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("context", &self.binder.context())
            .finish()
    }
}

impl SessionTokenManager {
    /// Creates a manager from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        storage: Arc<dyn TokenStorage>,
        login_service: Arc<dyn LoginService>,
        access_validator: Arc<dyn TokenValidator>,
        refresh_validator: Arc<dyn TokenValidator>,
        token_generator: Arc<dyn TokenGenerator>,
        user_directory: Arc<dyn UserDirectory>,
        context: Arc<SessionContext>,
    ) -> Self {
        Self {
            storage,
            login_service,
            access_validator,
            refresh_validator,
            token_generator,
            user_directory,
            binder: IdentityContextBinder::new(context),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Creates a manager using the JWT encoder and decoders built from `config`.
    pub fn from_config(
        config: &AuthConfig,
        storage: Arc<dyn TokenStorage>,
        user_directory: Arc<dyn UserDirectory>,
        context: Arc<SessionContext>,
    ) -> Self {
        let encoder = Arc::new(JwtEncoder::new(config));
        Self::new(
            storage,
            encoder.clone(),
            Arc::new(JwtDecoder::access(config)),
            Arc::new(JwtDecoder::refresh(config)),
            encoder,
            user_directory,
            context,
        )
    }

    /// Logs `user` in: issues a pair, persists it, and binds the context
    /// from the user record.
    ///
    /// The issued tokens are not validated here. Any failure propagates and
    /// leaves the context untouched.
    pub async fn login(&mut self, user: &ApplicationUser) -> AppResult<()> {
        let pair = self.login_service.login(user).await?;
        self.storage.set(STORAGE_KEY, &pair).await?;

        self.access_token = Some(pair.access_token);
        self.refresh_token = Some(pair.refresh_token);
        self.binder.bind_from_user(user);

        info!(
            user_id = %user.id,
            username = %user.username,
            tenant_id = ?user.tenant_id,
            "User logged in"
        );
        Ok(())
    }

    /// Resolves the principal of this session from stored tokens.
    ///
    /// Returns the anonymous principal rather than an error. A cryptographic
    /// fault additionally removes the stored pair.
    pub async fn get_principal(&mut self) -> AuthenticatedUserPrincipal {
        match self.resolve_principal().await {
            Ok(principal) => principal,
            Err(e) if e.is_cryptographic() => {
                warn!(error = %e, "Stored tokens are unreadable; removing them");
                if let Err(delete_err) = self.storage.delete(STORAGE_KEY).await {
                    warn!(error = %delete_err, "Failed to remove unreadable tokens");
                }
                AuthenticatedUserPrincipal::anonymous()
            }
            Err(e) => {
                warn!(error = %e, "Failed to resolve session principal");
                AuthenticatedUserPrincipal::anonymous()
            }
        }
    }

    async fn resolve_principal(&mut self) -> AppResult<AuthenticatedUserPrincipal> {
        let Some(pair) = self.storage.get(STORAGE_KEY).await? else {
            debug!("No stored tokens for session");
            return Ok(AuthenticatedUserPrincipal::anonymous());
        };

        self.access_token = Some(pair.access_token.clone());
        self.refresh_token = Some(pair.refresh_token.clone());

        match self.access_validator.validate_token(&pair.access_token).await? {
            TokenValidation::Valid(validated) => {
                return Ok(self.binder.bind_from_claims(validated.identity));
            }
            TokenValidation::Invalid(reason) => {
                debug!(%reason, "Access token rejected; trying refresh token");
            }
            TokenValidation::CorruptPayload(e) => return Err(as_cryptographic(e)),
        }

        match self
            .refresh_validator
            .validate_token(&pair.refresh_token)
            .await?
        {
            TokenValidation::Valid(validated) => {
                debug!("Session principal resolved from refresh token");
                Ok(self.binder.bind_from_claims(validated.identity))
            }
            TokenValidation::Invalid(reason) => {
                debug!(%reason, "Refresh token rejected");
                Ok(AuthenticatedUserPrincipal::anonymous())
            }
            TokenValidation::CorruptPayload(e) => Err(as_cryptographic(e)),
        }
    }

    /// Issues a new access token from `refresh_token`.
    ///
    /// Storage, the cached tokens and the context are not touched.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let validated = match self.refresh_validator.validate_token(refresh_token).await? {
            TokenValidation::Valid(validated) => validated,
            TokenValidation::Invalid(reason) => {
                return Err(AppError::with_source(
                    ErrorKind::Authentication,
                    format!("Invalid refresh token: {reason}"),
                    reason,
                ));
            }
            TokenValidation::CorruptPayload(e) => return Err(as_cryptographic(e)),
        };

        let user_id = validated.claims.user_id();
        let user = self
            .user_directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user found for id {user_id}")))?;

        let access_token = self.token_generator.generate_access_token(&user).await?;
        info!(user_id = %user.id, "Access token refreshed");
        Ok(access_token)
    }

    /// Deletes the stored token pair.
    ///
    /// The cached token strings and the bound context are left as they are.
    pub async fn remove_auth_data_from_storage(&self) -> AppResult<()> {
        self.storage.delete(STORAGE_KEY).await?;
        info!("Removed session tokens from storage");
        Ok(())
    }

    /// Alias of [`remove_auth_data_from_storage`](Self::remove_auth_data_from_storage).
    pub async fn logout(&self) -> AppResult<()> {
        self.remove_auth_data_from_storage().await
    }

    /// Access token last seen by this manager.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Refresh token last seen by this manager.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// The session context this manager binds into.
    pub fn context(&self) -> &Arc<SessionContext> {
        self.binder.context()
    }
}

/// A corrupt payload always counts as a cryptographic fault.
fn as_cryptographic(e: AppError) -> AppError {
    AppError {
        kind: ErrorKind::Cryptography,
        ..e
    }
}

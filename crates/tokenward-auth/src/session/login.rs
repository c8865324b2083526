//! Login: issuing a token pair for a user.

use async_trait::async_trait;
use tracing::warn;

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::token::TokenPair;
use tokenward_entity::user::ApplicationUser;

use crate::jwt::encoder::JwtEncoder;

/// Issues a fresh token pair for an already-identified user.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Issue a pair for `user`. Fails if the user may not sign in.
    async fn login(&self, user: &ApplicationUser) -> AppResult<TokenPair>;
}

#[async_trait]
impl LoginService for JwtEncoder {
    async fn login(&self, user: &ApplicationUser) -> AppResult<TokenPair> {
        if !user.is_active {
            warn!(user_id = %user.id, "Login refused for inactive user");
            return Err(AppError::authentication("User account is not active"));
        }

        self.generate_token_pair(user)
    }
}

//! JWT token creation with separate access/refresh signing keys.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use tokenward_core::config::AuthConfig;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::token::TokenPair;
use tokenward_entity::user::ApplicationUser;

use super::claims::{Claims, TokenType};

/// Issues new access tokens for a known user.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Sign a fresh access token for `user`.
    async fn generate_access_token(&self, user: &ApplicationUser) -> AppResult<String>;
}

/// Creates signed HS256 access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// Signing key for access tokens.
    access_key: EncodingKey,
    /// Signing key for refresh tokens.
    refresh_key: EncodingKey,
    /// `iss` claim value.
    issuer: String,
    /// `aud` claim value.
    audience: String,
    /// Access token lifetime.
    access_ttl: chrono::Duration,
    /// Refresh token lifetime.
    refresh_ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: chrono::Duration::minutes(config.access_ttl_minutes as i64),
            refresh_ttl: chrono::Duration::days(config.refresh_ttl_days as i64),
        }
    }

    /// Generates a new access + refresh token pair for `user`.
    pub fn generate_token_pair(&self, user: &ApplicationUser) -> AppResult<TokenPair> {
        let now = Utc::now();
        let (access_token, access_expires_at) = self.issue(user, TokenType::Access, now)?;
        let (refresh_token, refresh_expires_at) = self.issue(user, TokenType::Refresh, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Signs one token of `token_type` for `user`, returning it with its expiry.
    pub fn issue(
        &self,
        user: &ApplicationUser,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> AppResult<(String, DateTime<Utc>)> {
        let (key, ttl) = match token_type {
            TokenType::Access => (&self.access_key, self.access_ttl),
            TokenType::Refresh => (&self.refresh_key, self.refresh_ttl),
        };

        let claims = Claims::for_user(user, token_type, now, ttl, &self.issuer, &self.audience);
        let expires_at = claims.expires_at();
        let token = encode(&Header::default(), &claims, key).map_err(|e| {
            AppError::internal(format!("Failed to encode {token_type} token: {e}"))
        })?;

        Ok((token, expires_at))
    }
}

#[async_trait]
impl TokenGenerator for JwtEncoder {
    async fn generate_access_token(&self, user: &ApplicationUser) -> AppResult<String> {
        self.issue(user, TokenType::Access, Utc::now())
            .map(|(token, _)| token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_halves_differ() {
        let encoder = JwtEncoder::new(&AuthConfig::default());
        let pair = encoder
            .generate_token_pair(&ApplicationUser::new("alice"))
            .unwrap();

        assert!(pair.is_complete());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[tokio::test]
    async fn test_generated_access_tokens_are_fresh() {
        let encoder = JwtEncoder::new(&AuthConfig::default());
        let user = ApplicationUser::new("alice");

        let first = encoder.generate_access_token(&user).await.unwrap();
        let second = encoder.generate_access_token(&user).await.unwrap();
        assert_ne!(first, second);
    }
}

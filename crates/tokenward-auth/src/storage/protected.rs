//! Encrypted, session-scoped token storage on top of the cache layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use tokenward_cache::keys;
use tokenward_core::config::StorageConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;
use tokenward_core::traits::CacheProvider;
use tokenward_entity::token::TokenPair;

use super::TokenStorage;
use super::cipher::PayloadCipher;

/// Upper bound on how long a stored pair may live: one year.
const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Stores token pairs encrypted in a [`CacheProvider`], namespaced by a
/// session scope.
///
/// Each value is the JSON form of the pair, sealed with [`PayloadCipher`]
/// and base64-encoded.
#[derive(Debug, Clone)]
pub struct ProtectedTokenStorage {
    /// Backing cache.
    cache: Arc<dyn CacheProvider>,
    /// Payload cipher.
    cipher: PayloadCipher,
    /// Session identifier that namespaces every key.
    scope: String,
    /// Lifetime of stored entries.
    ttl: Duration,
}

impl ProtectedTokenStorage {
    /// Creates storage for one session scope.
    pub fn new(
        cache: Arc<dyn CacheProvider>,
        cipher: PayloadCipher,
        scope: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            cipher,
            scope: scope.into(),
            ttl,
        }
    }

    /// Creates storage for one session scope from configuration.
    pub fn from_config(
        cache: Arc<dyn CacheProvider>,
        config: &StorageConfig,
        scope: impl Into<String>,
    ) -> AppResult<Self> {
        let cipher = PayloadCipher::from_base64(&config.protection_key)?;
        let ttl = Duration::from_secs(config.token_ttl_hours.saturating_mul(3600))
            .min(MAX_TOKEN_TTL);
        Ok(Self::new(cache, cipher, scope, ttl))
    }

    /// The session scope this storage writes under.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Removes every value stored in this session's scope.
    pub async fn clear(&self) -> AppResult<u64> {
        let removed = self
            .cache
            .delete_pattern(&keys::session_pattern(&self.scope))
            .await?;
        debug!(scope = %self.scope, removed, "Cleared session scope");
        Ok(removed)
    }

    fn unprotect(&self, stored: &str) -> AppResult<TokenPair> {
        let sealed = STANDARD.decode(stored)?;
        let plaintext = self.cipher.open(&sealed)?;
        serde_json::from_slice(&plaintext).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                "Stored token pair is not valid JSON",
                e,
            )
        })
    }
}

#[async_trait]
impl TokenStorage for ProtectedTokenStorage {
    async fn set(&self, key: &str, pair: &TokenPair) -> AppResult<()> {
        if !pair.is_complete() {
            return Err(AppError::validation(
                "Refusing to store a token pair with a missing token",
            ));
        }

        let json = serde_json::to_vec(pair)?;
        let sealed = STANDARD.encode(self.cipher.seal(&json)?);
        self.cache
            .set(&keys::session_item(&self.scope, key), &sealed, self.ttl)
            .await
    }

    async fn get(&self, key: &str) -> AppResult<Option<TokenPair>> {
        match self
            .cache
            .get(&keys::session_item(&self.scope, key))
            .await?
        {
            Some(stored) => self.unprotect(&stored).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache
            .delete(&keys::session_item(&self.scope, key))
            .await
    }
}

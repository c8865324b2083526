//! Shared test helpers for integration tests.
//!
//! Builds the real stack: moka cache, AES-GCM protected storage, HS256
//! encoder/decoders and an in-memory user directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tokenward_auth::jwt::{Claims, TokenType};
use tokenward_auth::session::STORAGE_KEY;
use tokenward_auth::{
    InMemoryUserDirectory, PayloadCipher, ProtectedTokenStorage, SessionContext,
    SessionTokenManager, TokenStorage,
};
use tokenward_cache::keys;
use tokenward_cache::memory::MemoryCacheProvider;
use tokenward_core::config::{AppConfig, MemoryCacheConfig};
use tokenward_core::traits::CacheProvider;
use tokenward_core::types::{TenantId, UserId};
use tokenward_entity::token::TokenPair;
use tokenward_entity::user::ApplicationUser;

/// One session wired against the real collaborators.
pub struct TestSession {
    /// Application config
    pub config: AppConfig,
    /// Shared backing cache
    pub cache: Arc<dyn CacheProvider>,
    /// Session scope used for storage keys
    pub scope: String,
    /// Protected storage for this session
    pub storage: Arc<ProtectedTokenStorage>,
    /// User directory
    pub directory: Arc<InMemoryUserDirectory>,
    /// Session context
    pub context: Arc<SessionContext>,
    /// Manager under test
    pub manager: SessionTokenManager,
}

impl TestSession {
    /// Create a session with a fresh cache.
    pub fn new() -> Self {
        let cache: Arc<dyn CacheProvider> =
            Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig::default()));
        Self::on_cache(cache, Arc::new(InMemoryUserDirectory::new()))
    }

    /// Create another session sharing `cache` and `directory`.
    pub fn on_cache(cache: Arc<dyn CacheProvider>, directory: Arc<InMemoryUserDirectory>) -> Self {
        let config = test_config();
        let scope = Uuid::new_v4().to_string();
        let storage = Arc::new(
            ProtectedTokenStorage::from_config(cache.clone(), &config.storage, scope.clone())
                .expect("valid protection key"),
        );
        let context = Arc::new(SessionContext::new());
        let manager = SessionTokenManager::from_config(
            &config.auth,
            storage.clone(),
            directory.clone(),
            context.clone(),
        );

        Self {
            config,
            cache,
            scope,
            storage,
            directory,
            context,
            manager,
        }
    }

    /// Replace the manager with one whose storage seals under `key`,
    /// simulating a rotated protection key on the same session scope.
    pub fn rotate_protection_key(&mut self, key: [u8; 32]) {
        self.storage = Arc::new(ProtectedTokenStorage::new(
            self.cache.clone(),
            PayloadCipher::new(&key),
            self.scope.clone(),
            Duration::from_secs(3600),
        ));
        self.manager = SessionTokenManager::from_config(
            &self.config.auth,
            self.storage.clone(),
            self.directory.clone(),
            self.context.clone(),
        );
    }

    /// Register `user` in the directory.
    pub fn register(&self, user: &ApplicationUser) {
        self.directory.insert(user.clone());
    }

    /// Raw stored value for this session's pair.
    pub async fn raw_stored(&self) -> Option<String> {
        self.cache
            .get(&keys::session_item(&self.scope, STORAGE_KEY))
            .await
            .expect("cache get")
    }

    /// Decrypted stored pair.
    pub async fn stored_pair(&self) -> Option<TokenPair> {
        self.storage.get(STORAGE_KEY).await.expect("storage get")
    }

    /// Overwrite the stored value with bytes that are not a sealed payload.
    pub async fn corrupt_stored_payload(&self) {
        self.cache
            .set(
                &keys::session_item(&self.scope, STORAGE_KEY),
                "bm90IGEgc2VhbGVkIHBheWxvYWQ=",
                Duration::from_secs(3600),
            )
            .await
            .expect("cache set");
    }

    /// Swap the stored access token for one that expired an hour ago.
    pub async fn expire_stored_access_token(&self, user: &ApplicationUser) {
        let mut pair = self.stored_pair().await.expect("pair stored");
        pair.access_token = self.mint(user, TokenType::Access, hours_ago(2));
        self.storage
            .set(STORAGE_KEY, &pair)
            .await
            .expect("storage set");
    }

    /// Swap both stored tokens for expired ones.
    pub async fn expire_stored_tokens(&self, user: &ApplicationUser) {
        let mut pair = self.stored_pair().await.expect("pair stored");
        pair.access_token = self.mint(user, TokenType::Access, hours_ago(2));
        pair.refresh_token = self.mint(user, TokenType::Refresh, hours_ago(24 * 30));
        self.storage
            .set(STORAGE_KEY, &pair)
            .await
            .expect("storage set");
    }

    /// Sign a token with the configured secret, issued at `issued_at` with
    /// the configured lifetime for `token_type`.
    pub fn mint(
        &self,
        user: &ApplicationUser,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
    ) -> String {
        let auth = &self.config.auth;
        let (secret, ttl) = match token_type {
            TokenType::Access => (
                &auth.access_secret,
                chrono::Duration::minutes(auth.access_ttl_minutes as i64),
            ),
            TokenType::Refresh => (
                &auth.refresh_secret,
                chrono::Duration::days(auth.refresh_ttl_days as i64),
            ),
        };

        let claims = Claims::for_user(
            user,
            token_type,
            issued_at,
            ttl,
            &auth.issuer,
            &auth.audience,
        );
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode token")
    }
}

/// Test configuration with distinct secrets.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.access_secret = "integration-access-secret".to_string();
    config.auth.refresh_secret = "integration-refresh-secret".to_string();
    config
}

/// User 42 of tenant 7 ("Acme").
pub fn acme_user() -> ApplicationUser {
    ApplicationUser::new("u42")
        .with_id(UserId(Uuid::from_u128(42)))
        .with_tenant(TenantId(Uuid::from_u128(7)), "Acme")
}

/// `hours` hours before now.
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::hours(hours)
}

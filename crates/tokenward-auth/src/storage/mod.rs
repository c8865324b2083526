//! Token pair persistence.
//!
//! - `cipher`: AES-256-GCM sealing of stored payloads
//! - `protected`: session-scoped storage over a [`CacheProvider`](tokenward_core::traits::CacheProvider)

pub mod cipher;
pub mod protected;

pub use cipher::PayloadCipher;
pub use protected::ProtectedTokenStorage;

use async_trait::async_trait;

use tokenward_core::result::AppResult;
use tokenward_entity::token::TokenPair;

/// Session-scoped key/value storage for the token pair.
///
/// Absence is `Ok(None)`. A stored payload that cannot be decoded or
/// decrypted is reported as an error of kind
/// [`ErrorKind::Cryptography`](tokenward_core::ErrorKind::Cryptography).
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Store `pair` under `key`, replacing any previous value.
    async fn set(&self, key: &str, pair: &TokenPair) -> AppResult<()>;

    /// Read the pair stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Option<TokenPair>>;

    /// Remove the value under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

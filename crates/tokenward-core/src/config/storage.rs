//! Protected token storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for the encrypted, session-scoped token storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base64-encoded 32-byte AES-256-GCM key used to protect stored
    /// token pairs. Rotating it makes every stored pair undecryptable,
    /// which the session manager treats as a signal to evict.
    #[serde(default = "default_protection_key")]
    pub protection_key: String,
    /// How long a stored token pair survives in the cache, in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            protection_key: default_protection_key(),
            token_ttl_hours: default_token_ttl(),
        }
    }
}

/// Development key: 32 bytes of `0x2a`. Override it in any real deployment.
fn default_protection_key() -> String {
    "KioqKioqKioqKioqKioqKioqKioqKioqKioqKioqKio=".to_string()
}

fn default_token_ttl() -> u64 {
    168
}

//! Cached picklist configuration.

use serde::{Deserialize, Serialize};

/// Settings for cache-aside list loaders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicklistConfig {
    /// How long a loaded list stays cached, in minutes.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
}

impl Default for PicklistConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

//! Access/refresh token pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pair of access and refresh tokens issued together on login.
///
/// This is the only record written to token storage. It is stored whole:
/// a pair with a missing half is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Returns `true` when both halves carry a non-empty token string.
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

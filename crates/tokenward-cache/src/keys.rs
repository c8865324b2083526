//! Cache key builders for all Tokenward cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all Tokenward cache keys.
const PREFIX: &str = "tokenward";

// ── Session keys ───────────────────────────────────────────

/// Cache key for a value stored under `key` in one session's scope.
pub fn session_item(scope: &str, key: &str) -> String {
    format!("{PREFIX}:session:{scope}:{key}")
}

/// Pattern matching every value stored in one session's scope.
pub fn session_pattern(scope: &str) -> String {
    format!("{PREFIX}:session:{scope}:*")
}

// ── Picklist keys ──────────────────────────────────────────

/// Cache key for a named cached list.
pub fn list(name: &str) -> String {
    format!("{PREFIX}:list:{}", name.to_lowercase())
}

//! Token validation contract.
//!
//! Validation has three distinct outcomes. An ordinary invalid token
//! (expired, tampered, issued for someone else) is a normal result, not an
//! error. Unusable key material is reported separately as
//! [`TokenValidation::CorruptPayload`] because callers react to it
//! differently. `Err` is left for unexpected faults.

use async_trait::async_trait;
use thiserror::Error;

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;

use super::claims::{Claims, TokenType};
use super::identity::ClaimsIdentity;

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// `exp` is in the past (beyond leeway).
    #[error("token has expired")]
    Expired,
    /// `nbf` is in the future.
    #[error("token is not valid yet")]
    NotYetValid,
    /// The signature does not match the validator's key.
    #[error("invalid token signature")]
    BadSignature,
    /// `iss` is not the configured issuer.
    #[error("token issuer is not accepted")]
    WrongIssuer,
    /// `aud` is not the configured audience.
    #[error("token audience is not accepted")]
    WrongAudience,
    /// A refresh token presented as an access token or vice versa.
    #[error("expected {expected} token, got {actual} token")]
    WrongTokenType {
        /// The type this validator accepts.
        expected: TokenType,
        /// The type found in the token.
        actual: TokenType,
    },
    /// Not a decodable JWT, or required claims are missing.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// Any other rejection reported by the JWT library.
    #[error("token rejected: {0}")]
    Other(String),
}

/// A successfully validated token.
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    /// Claims identity for context binding.
    pub identity: ClaimsIdentity,
    /// Decoded claims of the token.
    pub claims: Claims,
}

/// Outcome of validating one token string.
#[derive(Debug)]
pub enum TokenValidation {
    /// The token is valid.
    Valid(ValidatedToken),
    /// The token is invalid for an ordinary reason.
    Invalid(TokenRejection),
    /// The token could not be checked at all because key material or
    /// decryption failed. Carries an error of kind `Cryptography`.
    CorruptPayload(AppError),
}

impl TokenValidation {
    /// `true` only for [`TokenValidation::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid(_))
    }
}

/// Validates token strings of one kind (access or refresh).
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate `token`. Must not return `Err` for an invalid token.
    async fn validate_token(&self, token: &str) -> AppResult<TokenValidation>;
}

//! JWT token validation for one token role (access or refresh).

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tokenward_core::config::AuthConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;

use super::claims::{Claims, TokenType};
use super::identity::ClaimsIdentity;
use super::validation::{TokenRejection, TokenValidation, TokenValidator, ValidatedToken};

/// Validates JWTs of a single [`TokenType`].
///
/// Build one with [`JwtDecoder::access`] and one with
/// [`JwtDecoder::refresh`]; each checks its own signing secret and rejects
/// tokens of the other type.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Whether a non-empty secret was configured.
    has_key_material: bool,
    /// Validation configuration.
    validation: Validation,
    /// Token type this decoder accepts.
    expected: TokenType,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("expected", &self.expected)
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Decoder for access tokens.
    pub fn access(config: &AuthConfig) -> Self {
        Self::new(&config.access_secret, TokenType::Access, config)
    }

    /// Decoder for refresh tokens.
    pub fn refresh(config: &AuthConfig) -> Self {
        Self::new(&config.refresh_secret, TokenType::Refresh, config)
    }

    fn new(secret: &str, expected: TokenType, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            has_key_material: !secret.is_empty(),
            validation,
            expected,
        }
    }

    /// The token type this decoder accepts.
    pub fn expected_type(&self) -> TokenType {
        self.expected
    }

    /// Decodes and validates a token string.
    ///
    /// Checks, in order: key material, signature, expiry (with leeway),
    /// issuer, audience, and finally the `token_type` claim.
    pub fn decode(&self, token: &str) -> TokenValidation {
        if !self.has_key_material {
            return TokenValidation::CorruptPayload(AppError::cryptography(format!(
                "No signing secret configured for {} tokens",
                self.expected
            )));
        }

        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => return classify(e),
        };

        if claims.token_type != self.expected {
            return TokenValidation::Invalid(TokenRejection::WrongTokenType {
                expected: self.expected,
                actual: claims.token_type,
            });
        }

        TokenValidation::Valid(ValidatedToken {
            identity: ClaimsIdentity::from(&claims),
            claims,
        })
    }
}

/// Sorts a `jsonwebtoken` failure into ordinary rejection or key-material fault.
fn classify(e: jsonwebtoken::errors::Error) -> TokenValidation {
    let rejection = match e.kind() {
        JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
        JwtErrorKind::ImmatureSignature => TokenRejection::NotYetValid,
        JwtErrorKind::InvalidSignature => TokenRejection::BadSignature,
        JwtErrorKind::InvalidIssuer => TokenRejection::WrongIssuer,
        JwtErrorKind::InvalidAudience => TokenRejection::WrongAudience,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::MissingRequiredClaim(_)
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_) => TokenRejection::Malformed(e.to_string()),
        JwtErrorKind::InvalidKeyFormat
        | JwtErrorKind::InvalidEcdsaKey
        | JwtErrorKind::InvalidRsaKey(_) => {
            return TokenValidation::CorruptPayload(AppError::with_source(
                ErrorKind::Cryptography,
                format!("Token key material is unusable: {e}"),
                e,
            ));
        }
        _ => TokenRejection::Other(e.to_string()),
    };

    TokenValidation::Invalid(rejection)
}

#[async_trait]
impl TokenValidator for JwtDecoder {
    async fn validate_token(&self, token: &str) -> AppResult<TokenValidation> {
        Ok(self.decode(token))
    }
}

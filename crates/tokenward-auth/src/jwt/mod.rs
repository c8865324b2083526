//! JWT token issuance, validation, and claims handling.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod identity;
pub mod validation;

pub use claims::{Claims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenGenerator};
pub use identity::{Claim, ClaimsIdentity, claim_types};
pub use validation::{TokenRejection, TokenValidation, TokenValidator, ValidatedToken};

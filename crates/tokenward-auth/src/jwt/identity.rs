//! Claims identity: the name/value claim set extracted from a validated token.

use serde::{Deserialize, Serialize};

use super::claims::Claims;

/// Well-known claim types shared with the token issuer.
pub mod claim_types {
    /// User identifier.
    pub const USER_ID: &str = "sub";
    /// Username.
    pub const USER_NAME: &str = "name";
    /// Tenant identifier.
    pub const TENANT_ID: &str = "tenant_id";
    /// Tenant display name.
    pub const TENANT_NAME: &str = "tenant_name";
    /// Unique token id.
    pub const TOKEN_ID: &str = "jti";
    /// `access` or `refresh`.
    pub const TOKEN_TYPE: &str = "token_type";
}

/// Authentication type recorded on identities built from JWTs.
pub const JWT_AUTHENTICATION_TYPE: &str = "jwt";

/// A single claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, usually one of [`claim_types`].
    pub claim_type: String,
    /// Claim value as text.
    pub value: String,
}

/// An ordered set of claims about one subject.
///
/// An empty identity is the anonymous identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsIdentity {
    authentication_type: Option<String>,
    claims: Vec<Claim>,
}

impl ClaimsIdentity {
    /// Create an identity with no claims for the given authentication type.
    pub fn new(authentication_type: impl Into<String>) -> Self {
        Self {
            authentication_type: Some(authentication_type.into()),
            claims: Vec::new(),
        }
    }

    /// Append a claim.
    pub fn add_claim(&mut self, claim_type: impl Into<String>, value: impl Into<String>) {
        self.claims.push(Claim {
            claim_type: claim_type.into(),
            value: value.into(),
        });
    }

    /// Builder-style variant of [`add_claim`](Self::add_claim).
    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_claim(claim_type, value);
        self
    }

    /// Value of the first claim of `claim_type`.
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// All claims in insertion order.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// How the identity was authenticated, if at all.
    pub fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    /// `true` for the anonymous identity.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl From<&Claims> for ClaimsIdentity {
    fn from(claims: &Claims) -> Self {
        let mut identity = ClaimsIdentity::new(JWT_AUTHENTICATION_TYPE)
            .with_claim(claim_types::USER_ID, claims.sub.to_string())
            .with_claim(claim_types::USER_NAME, claims.name.clone());

        if let Some(tenant_id) = claims.tenant_id {
            identity.add_claim(claim_types::TENANT_ID, tenant_id.to_string());
        }
        if let Some(tenant_name) = &claims.tenant_name {
            identity.add_claim(claim_types::TENANT_NAME, tenant_name.clone());
        }

        identity.add_claim(claim_types::TOKEN_ID, claims.jti.to_string());
        identity.add_claim(claim_types::TOKEN_TYPE, claims.token_type.to_string());
        identity
    }
}

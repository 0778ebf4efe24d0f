//! Bearer token decoding.
//!
//! Tokens are JWTs issued by the backend. The client never verifies the
//! signature (it has no key); `jsonwebtoken` reads the claims and enforces
//! the expiry. A token without an `exp` claim is unusable.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, Validation};
use periodica_core::Role;
use serde::Deserialize;
use thiserror::Error;

/// Errors that make a token unusable.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Not a readable JWT: bad segments, encoding, header or claims JSON.
    #[error("token is not a readable JWT: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    /// No `exp` claim.
    #[error("token has no expiry")]
    MissingExpiry,

    /// `exp` cannot be represented as a timestamp.
    #[error("token expiry {0} is out of range")]
    ExpiryOutOfRange(i64),

    /// `exp` is at or before the validation time.
    #[error("token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::MissingRequiredClaim(claim) if claim == "exp" => Self::MissingExpiry,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(e),
        }
    }
}

/// A granted authority, either `{"authority": "ROLE_USER"}` or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AuthorityClaim {
    Object { authority: String },
    Name(String),
}

impl AuthorityClaim {
    /// Authority name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object { authority } => authority,
            Self::Name(name) => name,
        }
    }
}

/// Claims the client reads from a token payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub authorities: Vec<AuthorityClaim>,
}

impl TokenClaims {
    /// Pick the principal's role.
    ///
    /// Priority: the role the server sent alongside the token, then the
    /// `role` claim, then the first `authorities` entry, then [`Role::DEFAULT`].
    #[must_use]
    pub fn resolve_role(&self, server_role: Option<&str>) -> Role {
        server_role
            .filter(|r| !r.trim().is_empty())
            .or_else(|| self.role.as_deref().filter(|r| !r.trim().is_empty()))
            .or_else(|| self.authorities.first().map(AuthorityClaim::name))
            .map_or(Role::DEFAULT, Role::parse)
    }
}

/// A decoded token known to be unexpired at validation time.
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub claims: TokenClaims,
    pub expires_at: DateTime<Utc>,
}

/// Claim checks for backend tokens: `exp` required, no leeway, signature
/// and audience unchecked.
fn validation() -> Validation {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.set_required_spec_claims(&["exp"]);
    validation.validate_aud = false;
    validation.leeway = 0;
    validation
}

/// Decode a token and require an expiry strictly after `now`.
///
/// `jsonwebtoken` already rejects tokens past the system clock; `now`
/// additionally rejects `exp <= now`.
///
/// # Errors
///
/// Returns `TokenError::Invalid` when the token cannot be read,
/// `TokenError::MissingExpiry` when there is no `exp` claim, or
/// `TokenError::Expired` when it has expired.
pub fn validate(token: &str, now: DateTime<Utc>) -> Result<ValidatedToken, TokenError> {
    let claims =
        jsonwebtoken::decode::<TokenClaims>(token.trim(), &DecodingKey::from_secret(&[]), &validation())?
            .claims;
    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    let expires_at = DateTime::from_timestamp(exp, 0).ok_or(TokenError::ExpiryOutOfRange(exp))?;

    if expires_at <= now {
        return Err(TokenError::Expired);
    }

    Ok(ValidatedToken { claims, expires_at })
}

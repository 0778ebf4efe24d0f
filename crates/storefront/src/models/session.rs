//! Session-related types.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use periodica_core::Principal;

/// The live authenticated session.
///
/// Exists only while a valid, unexpired token is held.
#[derive(Clone)]
pub struct Session {
    /// Bearer token issued by the backend.
    pub token: SecretString,
    /// Identity the token was issued to.
    pub principal: Principal,
    /// Token `exp` claim.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub const fn new(token: SecretString, principal: Principal, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            principal,
            expires_at,
        }
    }

    /// Whether the token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether this session was established with `token`.
    #[must_use]
    pub fn holds_token(&self, token: &SecretString) -> bool {
        self.token.expose_secret() == token.expose_secret()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("principal", &self.principal)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use periodica_core::{Email, Role};

    use super::*;

    #[test]
    fn test_expiry_boundary_and_redaction() {
        let expires_at = DateTime::from_timestamp(1_000, 0).unwrap();
        let session = Session::new(
            SecretString::from("tok-secret"),
            Principal::new(Email::parse("a@x.com").unwrap(), Role::User),
            expires_at,
        );

        assert!(!session.is_expired_at(DateTime::from_timestamp(999, 0).unwrap()));
        assert!(session.is_expired_at(expires_at));
        assert!(!format!("{session:?}").contains("tok-secret"));
        assert!(session.holds_token(&SecretString::from("tok-secret")));
        assert!(!session.holds_token(&SecretString::from("other")));
    }
}

//! Authenticated identity.

use serde::{Deserialize, Serialize};

use super::{Email, Role};

/// The identity derived from a valid credential.
///
/// Persisted alongside the token so a restored session can skip the
/// authentication round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Login email; also the key that scopes the principal's cart.
    pub email: Email,
    /// Canonical role.
    pub role: Role,
}

impl Principal {
    /// Create a principal.
    #[must_use]
    pub const fn new(email: Email, role: Role) -> Self {
        Self { email, role }
    }

    /// Whether this principal's role matches any of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_form_reloads_with_canonical_role() {
        let json = r#"{"email":"a@x.com","role":"ROLE_USER"}"#;
        let principal: Principal = serde_json::from_str(json).unwrap();
        assert_eq!(principal.role, Role::User);
        assert!(principal.has_any_role(&[Role::Admin, Role::User]));
        assert!(!principal.has_any_role(&[Role::Admin]));
    }
}

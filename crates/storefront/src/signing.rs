//! Outbound request signing.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// How outbound requests are signed.
///
/// The session owns exactly one policy and swaps it for a new value on every
/// login, restore, refresh and logout; the gateway reads it per request.
#[derive(Clone, Default)]
pub enum SigningPolicy {
    /// Send requests without credentials.
    #[default]
    Anonymous,
    /// Attach `Authorization: Bearer <token>`.
    Bearer(SecretString),
}

impl SigningPolicy {
    /// Sign a request according to this policy.
    #[must_use]
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Anonymous => request,
            Self::Bearer(token) => request.bearer_auth(token.expose_secret()),
        }
    }

    /// Whether requests carry a credential.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Bearer(_))
    }

    /// The bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        match self {
            Self::Anonymous => None,
            Self::Bearer(token) => Some(token),
        }
    }
}

impl fmt::Debug for SigningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_sets_authorization_header() {
        let client = reqwest::Client::new();
        let policy = SigningPolicy::Bearer(SecretString::from("abc.def.ghi"));
        let request = policy
            .apply(client.get("http://localhost/api/cart"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn test_anonymous_leaves_request_unsigned() {
        let client = reqwest::Client::new();
        let request = SigningPolicy::Anonymous
            .apply(client.get("http://localhost/api/publications"))
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
        assert!(!SigningPolicy::default().is_signed());
    }

    #[test]
    fn test_debug_redacts_token() {
        let policy = SigningPolicy::Bearer(SecretString::from("secret-token"));
        let debug = format!("{policy:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("REDACTED"));
    }
}

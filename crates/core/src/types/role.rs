//! Principal roles.
//!
//! Tokens and the authentication response carry roles in Spring form
//! (`ROLE_USER`) or bare form (`USER`). [`Role::parse`] canonicalizes both
//! so that comparisons never deal with wire prefixes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Prefix some role sources put in front of the role name.
const ROLE_PREFIX: &str = "ROLE_";

/// A canonical principal role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// A regular storefront customer.
    #[default]
    User,
    /// A back-office administrator.
    Admin,
    /// Any other role name, stored without the prefix.
    Other(String),
}

impl Role {
    /// Role assumed when neither the server nor the token names one.
    pub const DEFAULT: Self = Self::User;

    /// Canonicalize a role name from any source.
    ///
    /// Surrounding whitespace and a leading `ROLE_` are stripped. Names are
    /// case-sensitive, so `user` is not [`Role::User`].
    ///
    /// ```
    /// use periodica_core::Role;
    ///
    /// assert_eq!(Role::parse("ROLE_USER"), Role::User);
    /// assert_eq!(Role::parse("USER"), Role::User);
    /// assert_eq!(Role::parse("user"), Role::Other("user".into()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix(ROLE_PREFIX).unwrap_or(trimmed);
        match name {
            "USER" => Self::User,
            "ADMIN" => Self::Admin,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Canonical name without prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Typed storage keys.

use periodica_core::{Cart, Email, Principal};

/// A storage record: its key string and the type stored under it.
pub trait StorageKey {
    /// Type of the stored value.
    type Value;

    /// Key string in the backing store.
    fn storage_key(&self) -> String;
}

/// Raw bearer token of the live session.
#[derive(Debug, Clone, Copy)]
pub struct TokenKey;

impl StorageKey for TokenKey {
    type Value = String;

    fn storage_key(&self) -> String {
        "token".to_string()
    }
}

/// Principal of the live session.
#[derive(Debug, Clone, Copy)]
pub struct UserKey;

impl StorageKey for UserKey {
    type Value = Principal;

    fn storage_key(&self) -> String {
        "user".to_string()
    }
}

/// Cart belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartKey(Email);

impl CartKey {
    #[must_use]
    pub const fn new(owner: Email) -> Self {
        Self(owner)
    }

    /// Owner of the cart.
    #[must_use]
    pub const fn owner(&self) -> &Email {
        &self.0
    }
}

impl StorageKey for CartKey {
    type Value = Cart;

    fn storage_key(&self) -> String {
        format!("cart_{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strings() {
        assert_eq!(TokenKey.storage_key(), "token");
        assert_eq!(UserKey.storage_key(), "user");
        let key = CartKey::new(Email::parse("a@x.com").unwrap());
        assert_eq!(key.storage_key(), "cart_a@x.com");
        assert_eq!(key.owner().as_str(), "a@x.com");
    }
}

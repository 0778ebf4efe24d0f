//! User profile resources and their client-side validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use periodica_core::UserId;

/// Minimum length of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("Invalid regex"));
static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+7\d{10}$").expect("Invalid regex"));

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Body of `PUT /api/users/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone_number: String,
}

impl ProfileUpdate {
    /// Trim every field.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }

    /// Check the fields the backend would reject.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        check_length("Name", &self.name, 2, 50)?;
        check_length("Address", &self.address, 5, 200)?;
        check_length("City", &self.city, 2, 50)?;
        if !POSTAL_CODE_RE.is_match(&self.postal_code) {
            return Err("Postal code must be 6 digits".to_string());
        }
        if !PHONE_NUMBER_RE.is_match(&self.phone_number) {
            return Err("Phone number must be in the format +7XXXXXXXXXX".to_string());
        }
        Ok(())
    }
}

/// Body of `PUT /api/users/change-password`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(serialize_with = "expose")]
    pub current_password: SecretString,
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

impl PasswordChange {
    /// Check the new password before sending.
    ///
    /// # Errors
    ///
    /// Returns a message when either password is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.current_password.expose_secret().is_empty() {
            return Err("Current password is required".to_string());
        }
        if self.new_password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "New password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(format!("{field} must be between {min} and {max} characters"))
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

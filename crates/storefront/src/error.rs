//! Unified client error handling with Sentry integration.
//!
//! Every fallible call that reaches the backend returns `Result<T, ClientError>`.
//! `ClientError::user_message` gives the render layer text it can show as-is.

use thiserror::Error;

use crate::services::auth::AuthError;
use crate::storage::StorageError;
use crate::token::TokenError;

/// Client-level error type for the storefront.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Authentication or signup call failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Credential could not be decoded or is already expired.
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    /// No response from the backend.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the credential on an authenticated call.
    #[error("Authorization lost")]
    AuthorizationLost,

    /// The backend answered with a non-success status.
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, when present.
        message: Option<String>,
    },

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Persisting client state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input rejected before sending.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Text suitable for a user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            Self::Auth(AuthError::InvalidEmail(_)) => "Please enter a valid email address".to_string(),
            Self::Auth(AuthError::Validation(msg)) | Self::Validation(msg) => msg.clone(),
            Self::Auth(AuthError::Server {
                message: Some(msg), ..
            })
            | Self::Api {
                message: Some(msg), ..
            } => msg.clone(),
            Self::Auth(AuthError::Network(_)) | Self::Network(_) => {
                "Unable to reach the server, please try again".to_string()
            }
            Self::InvalidToken(_) => "The server returned an unusable session".to_string(),
            Self::AuthorizationLost => "Your session has expired, please log in again".to_string(),
            _ => "Something went wrong, please try again".to_string(),
        }
    }

    /// Whether this error is worth reporting to Sentry.
    ///
    /// User mistakes and expected session endings are not.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::Storage(_) | Self::InvalidUrl(_) | Self::InvalidToken(_)
        ) || matches!(self, Self::Api { status, .. } if *status >= 500)
    }

    /// Capture to Sentry if reportable, logging either way.
    pub fn report(&self) {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Client error");
        } else {
            tracing::debug!(error = %self, "Client error");
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Set the Sentry user context for the logged-in principal.
pub fn set_sentry_user(email: &str, role: &str) {
    sentry::configure_scope(|scope| {
        let mut user = sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        };
        user.other
            .insert("role".to_string(), serde_json::Value::String(role.to_string()));
        scope.set_user(Some(user));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("publication_id", "7")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Api {
            status: 409,
            message: Some("Already subscribed".to_string()),
        };
        assert_eq!(err.to_string(), "API error 409: Already subscribed");

        let err = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "API error 500: no message");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ClientError::Auth(AuthError::InvalidCredentials).user_message(),
            "Invalid email or password"
        );
        assert_eq!(
            ClientError::Api {
                status: 400,
                message: Some("Publication not found".to_string())
            }
            .user_message(),
            "Publication not found"
        );
        assert_eq!(
            ClientError::Validation("Postal code must be 6 digits".to_string()).user_message(),
            "Postal code must be 6 digits"
        );
        assert!(
            ClientError::AuthorizationLost
                .user_message()
                .contains("log in")
        );
    }

    #[test]
    fn test_reportable() {
        assert!(!ClientError::AuthorizationLost.is_reportable());
        assert!(
            !ClientError::Api {
                status: 404,
                message: None
            }
            .is_reportable()
        );
        assert!(
            ClientError::Api {
                status: 503,
                message: None
            }
            .is_reportable()
        );
    }
}

//! Authentication error types.

use thiserror::Error;

/// Errors from the backend's authentication endpoints.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair (HTTP 401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend answered with another non-success status.
    #[error("server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, when present.
        message: Option<String>,
    },

    /// No response from the backend.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success response without the expected token field.
    #[error("malformed auth response: {0}")]
    MalformedResponse(String),

    /// Input rejected before sending.
    #[error("{0}")]
    Validation(String),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] periodica_core::EmailError),
}

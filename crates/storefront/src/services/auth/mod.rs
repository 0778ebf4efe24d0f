//! Backend authentication endpoints.
//!
//! Thin wrappers over `POST /api/auth/authenticate`, `/refresh` and
//! `/signup`. Session state lives in [`crate::services::session`]; these
//! functions only talk to the backend and classify its answers.

mod error;

pub use error::AuthError;

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use periodica_core::Email;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum username length accepted at signup.
pub const MIN_USERNAME_LENGTH: usize = 3;

const AUTHENTICATE_PATH: &str = "api/auth/authenticate";
const REFRESH_PATH: &str = "api/auth/refresh";
const SIGNUP_PATH: &str = "api/auth/signup";

/// Token issued by a successful login.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: SecretString,
    /// Role the server reported next to the token, if any.
    pub role: Option<String>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Request body for authentication.
#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from the authentication endpoint.
#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default, alias = "accessToken")]
    token: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Response from the refresh endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    #[serde(default, alias = "token")]
    access_token: Option<String>,
}

/// Error body returned by the backend.
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// New account details for `POST /api/auth/signup`.
#[derive(Clone)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupBody<'a> {
    first_name: &'a str,
    last_name: &'a str,
    username: &'a str,
    password: &'a str,
    email: &'a str,
}

impl SignupRequest {
    /// Check the request before sending it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for a short username or password and
    /// `AuthError::InvalidEmail` for a malformed email.
    pub fn validate(&self) -> Result<Email, AuthError> {
        if self.username.trim().chars().count() < MIN_USERNAME_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters"
            )));
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(Email::parse(&self.email)?)
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// AuthClient
// =============================================================================

/// HTTP client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create an auth client. `base_url` must end in `/`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// See [`authenticate`].
    ///
    /// # Errors
    ///
    /// See [`authenticate`].
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<IssuedToken, AuthError> {
        authenticate(&self.client, &self.base_url, email, password).await
    }

    /// See [`refresh`].
    ///
    /// # Errors
    ///
    /// See [`refresh`].
    pub async fn refresh(&self, token: &SecretString) -> Result<SecretString, AuthError> {
        refresh(&self.client, &self.base_url, token).await
    }

    /// See [`signup`].
    ///
    /// # Errors
    ///
    /// See [`signup`].
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), AuthError> {
        signup(&self.client, &self.base_url, request).await
    }
}

// =============================================================================
// Endpoint Functions
// =============================================================================

/// Exchange email and password for a token.
///
/// Both values are sent trimmed.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on 401, `AuthError::Server` on any
/// other failure status, `AuthError::Network` when the request cannot be sent
/// and `AuthError::MalformedResponse` when the body has no token.
#[instrument(skip(client, base_url, password), fields(email = %email.trim()))]
pub async fn authenticate(
    client: &reqwest::Client,
    base_url: &Url,
    email: &str,
    password: &SecretString,
) -> Result<IssuedToken, AuthError> {
    let response = client
        .post(endpoint(base_url, AUTHENTICATE_PATH)?)
        .json(&AuthRequest {
            email: email.trim(),
            password: password.expose_secret().trim(),
        })
        .send()
        .await?;

    let response = check_status(response).await?;
    let body: AuthResponse = response
        .json()
        .await
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    let token = body
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::MalformedResponse("missing token".to_string()))?;

    Ok(IssuedToken {
        token: SecretString::from(token),
        role: body.role,
    })
}

/// Trade the current token for a new one.
///
/// # Errors
///
/// Same classification as [`authenticate`].
#[instrument(skip_all)]
pub async fn refresh(
    client: &reqwest::Client,
    base_url: &Url,
    token: &SecretString,
) -> Result<SecretString, AuthError> {
    let response = client
        .post(endpoint(base_url, REFRESH_PATH)?)
        .bearer_auth(token.expose_secret())
        .send()
        .await?;

    let response = check_status(response).await?;
    let body: RefreshResponse = response
        .json()
        .await
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    body.access_token
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| AuthError::MalformedResponse("missing accessToken".to_string()))
}

/// Register a new account. The returned token is discarded; callers log in
/// afterwards.
///
/// # Errors
///
/// Returns `AuthError::Validation` or `AuthError::InvalidEmail` before
/// sending, otherwise the same classification as [`authenticate`].
#[instrument(skip(client, base_url, request), fields(email = %request.email.trim()))]
pub async fn signup(
    client: &reqwest::Client,
    base_url: &Url,
    request: &SignupRequest,
) -> Result<(), AuthError> {
    let email = request.validate()?;

    let response = client
        .post(endpoint(base_url, SIGNUP_PATH)?)
        .json(&SignupBody {
            first_name: request.first_name.trim(),
            last_name: request.last_name.trim(),
            username: request.username.trim(),
            password: request.password.expose_secret(),
            email: email.as_str(),
        })
        .send()
        .await?;

    check_status(response).await?;
    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn endpoint(base_url: &Url, path: &str) -> Result<Url, AuthError> {
    base_url
        .join(path)
        .map_err(|e| AuthError::MalformedResponse(format!("invalid endpoint {path}: {e}")))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AuthError::InvalidCredentials);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message);

    tracing::warn!(status = %status, message = ?message, "Auth endpoint returned error status");

    Err(AuthError::Server {
        status: status.as_u16(),
        message,
    })
}

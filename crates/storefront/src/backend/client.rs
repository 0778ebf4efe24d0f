//! Signed HTTP gateway to the REST backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{ClientError, Result};
use crate::services::SessionStore;

/// Error body returned by the backend.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// The single outbound channel for backend resources.
///
/// Every request first gives the session a chance to refresh an expired
/// token, then is signed with the session's current policy. A 401 ends the
/// session.
#[derive(Clone)]
pub struct HttpGateway {
    inner: Arc<HttpGatewayInner>,
}

struct HttpGatewayInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl HttpGateway {
    /// Create a gateway. `base_url` must end in `/`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: Url, session: SessionStore, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, session))
    }

    /// Create a gateway around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: Url, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(HttpGatewayInner {
                client,
                base_url,
                session,
            }),
        }
    }

    /// Session the gateway signs with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    /// `GET` and decode JSON.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode JSON.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// `PUT` a JSON body and decode JSON.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }

    /// `DELETE`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Send a request and ignore any response body.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn execute<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }

    /// Send a signed request and classify the status.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::AuthorizationLost` on 401 (after ending the
    /// session), `ClientError::Api` on any other failure status and
    /// `ClientError::Network` when no response arrives.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = self.inner.base_url.join(path.trim_start_matches('/'))?;

        self.inner.session.ensure_fresh().await;
        let policy = self.inner.session.signing_policy();

        let mut request = policy.apply(self.inner.client.request(method, url));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, signed = policy.is_signed(), "Backend response");

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.inner.session.authorization_lost();
            return Err(ClientError::AuthorizationLost);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message);
        warn!(
            status = %status,
            message = ?message,
            body = %text.chars().take(200).collect::<String>(),
            "Backend returned non-success status"
        );

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body, logging a prefix of it on mismatch.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        warn!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        ClientError::Parse(e)
    })
}

//! Storefront client configuration loaded from environment variables.
//!
//! The build profile picks the default backend: debug builds talk to a local
//! backend, release builds to production. Every value can be overridden at
//! runtime.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PERIODICA_API_BASE_URL` - Backend base URL (default depends on build profile)
//! - `PERIODICA_STORAGE_DIR` - Directory for persisted client state
//!   (default: in-memory storage only)
//! - `PERIODICA_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `PERIODICA_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `PERIODICA_EXPIRY_CHECK_SECS` - Token expiry check interval (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend used by debug builds.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8080/";

/// Backend used by release builds.
pub const PRODUCTION_API_BASE_URL: &str = "https://myapp.herokuapp.com/";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_EXPIRY_CHECK_SECS: u64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment target selected at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development backend.
    Local,
    /// Production backend.
    Production,
}

impl Environment {
    /// Environment implied by the build profile.
    #[must_use]
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Local
        } else {
            Self::Production
        }
    }

    /// Default backend base URL for this environment.
    #[must_use]
    pub const fn default_api_base_url(self) -> &'static str {
        match self {
            Self::Local => LOCAL_API_BASE_URL,
            Self::Production => PRODUCTION_API_BASE_URL,
        }
    }

    /// Name reported to Sentry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "development",
            Self::Production => "production",
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Build-selected environment
    pub environment: Environment,
    /// Backend base URL, always ending in `/`
    pub api_base_url: Url,
    /// Directory for persisted client state (`None` keeps state in memory)
    pub storage_dir: Option<PathBuf>,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Catalog response cache lifetime
    pub catalog_cache_ttl: Duration,
    /// How often the background monitor checks token expiry
    pub expiry_check_interval: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment override
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = Environment::from_build();
        let api_base_url = parse_base_url(
            "PERIODICA_API_BASE_URL",
            &get_env_or_default("PERIODICA_API_BASE_URL", environment.default_api_base_url()),
        )?;

        Ok(Self {
            environment,
            api_base_url,
            storage_dir: get_optional_env("PERIODICA_STORAGE_DIR").map(PathBuf::from),
            request_timeout: get_duration_secs(
                "PERIODICA_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            catalog_cache_ttl: get_duration_secs(
                "PERIODICA_CATALOG_CACHE_TTL_SECS",
                DEFAULT_CATALOG_CACHE_TTL_SECS,
            )?,
            expiry_check_interval: get_duration_secs(
                "PERIODICA_EXPIRY_CHECK_SECS",
                DEFAULT_EXPIRY_CHECK_SECS,
            )?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a given backend with defaults everywhere else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_build(),
            api_base_url: parse_base_url("api_base_url", base_url)?,
            storage_dir: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
            expiry_check_interval: Duration::from_secs(DEFAULT_EXPIRY_CHECK_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a whole number of seconds as a `Duration`.
fn get_duration_secs(key: &str, default: u64) -> Result<Duration, ConfigError> {
    get_optional_env(key).map_or(Ok(Duration::from_secs(default)), |raw| {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a base URL, appending the trailing slash `Url::join` relies on.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

//! Client state shared across the render layer.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use periodica_core::Principal;

use crate::backend::{CatalogApi, HttpGateway, ProfileApi, RemoteCartApi, SubscriptionsApi};
use crate::config::StorefrontConfig;
use crate::error::{Result, add_breadcrumb};
use crate::routes::{self, Navigation};
use crate::services::auth::AuthClient;
use crate::services::{CartStore, SessionStore};
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage};

/// Result of [`Storefront::checkout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// No user is logged in or the cart is empty; nothing was sent.
    NothingToCheckout,
    /// Subscriptions were created and the cart was cleared.
    Submitted {
        /// Number of cart lines turned into subscriptions.
        lines: usize,
    },
}

/// Storefront client state.
///
/// This struct is cheaply cloneable via `Arc` and wires the session, the
/// cart and the backend endpoints around one storage backend and one HTTP
/// client.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    storage: Arc<dyn KeyValueStore>,
    session: SessionStore,
    cart: CartStore,
    gateway: HttpGateway,
    catalog: CatalogApi,
    subscriptions: SubscriptionsApi,
    profile: ProfileApi,
    remote_cart: RemoteCartApi,
}

impl Storefront {
    /// Create the client state.
    ///
    /// Persists to `config.storage_dir` when set, otherwise in memory.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the storage directory cannot be
    /// created, or `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::open(dir)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Create the client state on an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let auth = AuthClient::new(http.clone(), config.api_base_url.clone());
        let session = SessionStore::new(auth, Arc::clone(&storage));
        let cart = CartStore::new(Arc::clone(&storage), session.subscribe());
        let gateway = HttpGateway::with_client(http, config.api_base_url.clone(), session.clone());

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                catalog: CatalogApi::new(gateway.clone(), config.catalog_cache_ttl),
                subscriptions: SubscriptionsApi::new(gateway.clone()),
                profile: ProfileApi::new(gateway.clone()),
                remote_cart: RemoteCartApi::new(gateway.clone()),
                config,
                storage,
                session,
                cart,
                gateway,
            }),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.storage
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the current user's cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the signed HTTP gateway.
    #[must_use]
    pub fn gateway(&self) -> &HttpGateway {
        &self.inner.gateway
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogApi {
        &self.inner.catalog
    }

    #[must_use]
    pub fn subscriptions(&self) -> &SubscriptionsApi {
        &self.inner.subscriptions
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileApi {
        &self.inner.profile
    }

    #[must_use]
    pub fn remote_cart(&self) -> &RemoteCartApi {
        &self.inner.remote_cart
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Reinstate the persisted session. Call once at startup.
    pub fn restore(&self) -> Option<Principal> {
        self.inner.session.restore()
    }

    /// Decide what to show for `path` given the current principal.
    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        routes::resolve(path, self.inner.session.principal().as_ref())
    }

    /// Start the background token expiry monitor at the configured interval.
    #[must_use]
    pub fn spawn_expiry_monitor(&self) -> JoinHandle<()> {
        self.inner
            .session
            .spawn_expiry_monitor(self.inner.config.expiry_check_interval)
    }

    /// Turn the cart into subscriptions, then clear it.
    ///
    /// The cart is kept when the backend call fails, and left alone when the
    /// principal changed while the call was in flight.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<CheckoutOutcome> {
        let cart = &self.inner.cart;
        let Some(owner) = cart.owner() else {
            return Ok(CheckoutOutcome::NothingToCheckout);
        };
        let snapshot = cart.snapshot();
        if snapshot.is_empty() {
            return Ok(CheckoutOutcome::NothingToCheckout);
        }

        let lines = snapshot.len();
        let total = snapshot.total_price().to_string();
        add_breadcrumb("checkout", "Checkout started", Some(&[("total", total.as_str())]));

        if let Err(e) = self.inner.subscriptions.create_from_cart(&snapshot).await {
            warn!(error = %e, "Checkout failed, keeping cart");
            return Err(e);
        }

        cart.clear_for(&owner);
        add_breadcrumb("checkout", "Checkout completed", None);
        info!(lines, "Checkout completed");
        Ok(CheckoutOutcome::Submitted { lines })
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("api_base_url", &self.inner.config.api_base_url.as_str())
            .field("principal", &self.inner.session.principal())
            .finish_non_exhaustive()
    }
}

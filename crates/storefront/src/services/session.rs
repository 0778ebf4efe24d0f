//! Session lifecycle.
//!
//! [`SessionStore`] owns the bearer token and the principal derived from it.
//! It persists both, installs the [`SigningPolicy`] the gateway signs with,
//! and publishes principal changes on a `watch` channel.
//!
//! # Ordering
//!
//! Establishing a session writes storage first, then swaps the in-memory
//! session and signing policy, then publishes the principal. Ending a session
//! purges storage, resets the policy to anonymous and publishes `None`.
//! Principal changes are published before the call that causes them returns.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use periodica_core::{Email, Principal};

use crate::error::{ClientError, clear_sentry_user, set_sentry_user};
use crate::models::Session;
use crate::services::auth::{AuthClient, AuthError, SignupRequest};
use crate::signing::SigningPolicy;
use crate::storage::{KeyValueStore, Store, TokenKey, UserKey};
use crate::token;

/// Owner of the authentication state.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    auth: AuthClient,
    token_store: Store<TokenKey>,
    user_store: Store<UserKey>,
    session: RwLock<Option<Session>>,
    policy: RwLock<Arc<SigningPolicy>>,
    principal_tx: watch::Sender<Option<Principal>>,
    /// Serializes refreshes so concurrent callers share one round trip.
    refresh_lock: Mutex<()>,
}

impl SessionStore {
    /// Create a store with no session.
    #[must_use]
    pub fn new(auth: AuthClient, storage: Arc<dyn KeyValueStore>) -> Self {
        let (principal_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionStoreInner {
                auth,
                token_store: Store::new(Arc::clone(&storage), &TokenKey),
                user_store: Store::new(storage, &UserKey),
                session: RwLock::new(None),
                policy: RwLock::new(Arc::new(SigningPolicy::Anonymous)),
                principal_tx,
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current principal, if logged in.
    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        self.inner.principal_tx.borrow().clone()
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.principal_tx.borrow().is_some()
    }

    /// Subscribe to principal changes.
    ///
    /// The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.inner.principal_tx.subscribe()
    }

    /// Signing policy for the next outbound request.
    #[must_use]
    pub fn signing_policy(&self) -> Arc<SigningPolicy> {
        Arc::clone(
            &self
                .inner
                .policy
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Expiry of the held token.
    #[must_use]
    pub fn expires_at(&self) -> Option<chrono::DateTime<Utc>> {
        self.read_session().as_ref().map(|s| s.expires_at)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Log in with email and password.
    ///
    /// Returns only after the token is persisted, the signing policy
    /// installed and the principal published. Any failure purges persisted
    /// credentials and leaves the store logged out.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when the backend refuses or cannot be
    /// reached, `ClientError::InvalidToken` when the issued token has no
    /// usable expiry, and `ClientError::Storage` when persisting fails.
    #[instrument(skip(self, password), fields(email = %email.trim()))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Principal, ClientError> {
        match self.try_login(email, password).await {
            Ok(principal) => {
                info!(role = %principal.role, "Logged in");
                Ok(principal)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.logout();
                Err(e)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &SecretString) -> Result<Principal, ClientError> {
        let email = Email::parse(email).map_err(AuthError::from)?;
        let issued = self.inner.auth.authenticate(email.as_str(), password).await?;

        let validated = token::validate(issued.token.expose_secret(), Utc::now())?;
        let role = validated.claims.resolve_role(issued.role.as_deref());
        let principal = Principal::new(email, role);

        self.establish(Session::new(
            issued.token,
            principal.clone(),
            validated.expires_at,
        ))?;
        Ok(principal)
    }

    /// Register an account, then log in with it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` for rejected input or a failed signup,
    /// otherwise the errors of [`Self::login`].
    #[instrument(skip(self, request), fields(email = %request.email.trim()))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<Principal, ClientError> {
        self.inner.auth.signup(request).await?;
        info!("Account created");
        self.login(&request.email, &request.password).await
    }

    /// Reinstate the persisted session at startup.
    ///
    /// Returns `None` (after purging storage) when there is no token, the
    /// token is unreadable or expired, or the user record is missing.
    #[instrument(skip(self))]
    pub fn restore(&self) -> Option<Principal> {
        let raw = match self.inner.token_store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted session");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Persisted token unreadable");
                self.logout();
                return None;
            }
        };

        let validated = match token::validate(&raw, Utc::now()) {
            Ok(validated) => validated,
            Err(e) => {
                info!(reason = %e, "Discarding persisted session");
                self.logout();
                return None;
            }
        };

        let principal = match self.inner.user_store.load() {
            Ok(Some(principal)) => principal,
            Ok(None) => {
                info!("Persisted token has no user record");
                self.logout();
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Persisted user record unreadable");
                self.logout();
                return None;
            }
        };

        self.install(
            &mut self.write_session(),
            Session::new(SecretString::from(raw), principal.clone(), validated.expires_at),
        );
        info!(email = %principal.email, role = %principal.role, "Session restored");
        Some(principal)
    }

    /// End the session. Safe to call when already logged out.
    pub fn logout(&self) {
        self.end_session_if(|_| true);
    }

    /// Forced logout after the backend rejected the credential.
    pub fn authorization_lost(&self) {
        if self.is_authenticated() {
            warn!("Authorization lost, ending session");
        }
        self.logout();
    }

    /// Replace the token with a fresh one.
    ///
    /// Any failure ends the session. A logout or a different login that
    /// happens while the request is in flight wins; the new token is
    /// discarded and the newer session is left alone.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        let Some(current) = self.current_session() else {
            debug!("No session to refresh");
            return;
        };

        let result = match self.inner.auth.refresh(&current.token).await {
            Ok(new_token) => self.apply_refreshed(&current, new_token),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(true) => info!(email = %current.principal.email, "Token refreshed"),
            Ok(false) => debug!("Session changed during refresh, discarding new token"),
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                if !self.end_session_if(|s| s.is_some_and(|s| s.holds_token(&current.token))) {
                    debug!("Session changed during refresh, keeping it");
                }
            }
        }
    }

    /// Swap `new_token` into the session `current` was taken from.
    ///
    /// Returns `Ok(false)` without touching anything if that session is no
    /// longer installed. The check, the write to storage and the swap all
    /// happen under the session lock.
    fn apply_refreshed(
        &self,
        current: &Session,
        new_token: SecretString,
    ) -> Result<bool, ClientError> {
        let validated = token::validate(new_token.expose_secret(), Utc::now())?;

        let mut slot = self.write_session();
        let Some(session) = slot
            .as_mut()
            .filter(|s| s.holds_token(&current.token))
        else {
            return Ok(false);
        };

        self.inner
            .token_store
            .save(&new_token.expose_secret().to_string())?;
        session.token = new_token.clone();
        session.expires_at = validated.expires_at;
        *self
            .inner
            .policy
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(SigningPolicy::Bearer(new_token));
        Ok(true)
    }

    /// Refresh if the held token has expired.
    pub async fn ensure_fresh(&self) {
        if !self.needs_refresh() {
            return;
        }

        let _guard = self.inner.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited.
        if self.needs_refresh() {
            self.refresh().await;
        }
    }

    /// Check expiry every `period` until the returned task is aborted.
    #[must_use = "dropping the handle does not stop the monitor; abort it"]
    pub fn spawn_expiry_monitor(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                store.ensure_fresh().await;
            }
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn needs_refresh(&self) -> bool {
        let now = Utc::now();
        self.read_session()
            .as_ref()
            .is_some_and(|s| s.is_expired_at(now))
    }

    /// Persist, then install and publish, all under the session lock.
    fn establish(&self, session: Session) -> Result<(), ClientError> {
        let mut slot = self.write_session();
        self.inner
            .token_store
            .save(&session.token.expose_secret().to_string())?;
        self.inner.user_store.save(&session.principal)?;
        self.install(&mut slot, session);
        Ok(())
    }

    /// Swap in a session whose storage is already written.
    fn install(&self, slot: &mut Option<Session>, session: Session) {
        let principal = session.principal.clone();
        let policy = Arc::new(SigningPolicy::Bearer(session.token.clone()));

        *slot = Some(session);
        *self
            .inner
            .policy
            .write()
            .unwrap_or_else(PoisonError::into_inner) = policy;

        set_sentry_user(principal.email.as_str(), principal.role.as_str());
        self.inner.principal_tx.send_if_modified(|current| {
            if current.as_ref() == Some(&principal) {
                false
            } else {
                *current = Some(principal);
                true
            }
        });
    }

    /// Purge storage, reset the policy and publish `None` if `matches`
    /// accepts the installed session. Returns whether it did.
    fn end_session_if(&self, matches: impl FnOnce(Option<&Session>) -> bool) -> bool {
        let mut slot = self.write_session();
        if !matches(slot.as_ref()) {
            return false;
        }

        if let Err(e) = self.inner.token_store.remove() {
            warn!(error = %e, "Failed to remove persisted token");
        }
        if let Err(e) = self.inner.user_store.remove() {
            warn!(error = %e, "Failed to remove persisted user");
        }

        let had_session = slot.take().is_some();
        *self
            .inner
            .policy
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(SigningPolicy::Anonymous);

        self.inner.principal_tx.send_if_modified(|current| {
            if current.is_some() {
                *current = None;
                true
            } else {
                false
            }
        });
        drop(slot);

        if had_session {
            clear_sentry_user();
            info!("Logged out");
        }
        true
    }

    fn current_session(&self) -> Option<Session> {
        self.read_session().clone()
    }

    fn read_session(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("principal", &self.principal())
            .field("signed", &self.signing_policy().is_signed())
            .finish_non_exhaustive()
    }
}

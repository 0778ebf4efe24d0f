//! Per-user client-side cart.
//!
//! [`CartStore`] follows the principal published by the session. Before any
//! operation it reconciles with the latest principal: a different user loads
//! that user's persisted cart, no user means an empty cart and every
//! operation is a silent no-op.
//!
//! Mutations are applied to a copy, persisted, and only then swapped in. A
//! storage failure is logged and leaves the in-memory cart unchanged; the
//! store never fails outward.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, warn};

use periodica_core::{Cart, CartLine, Email, Price, Principal, PublicationId, SubscriptionPeriod};

use crate::error::add_breadcrumb;
use crate::models::Publication;
use crate::storage::{CartKey, KeyValueStore, Store};

/// Cart of the current principal.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStore>,
    principal_rx: watch::Receiver<Option<Principal>>,
    state: RwLock<CartState>,
}

#[derive(Default)]
struct CartState {
    owner: Option<Email>,
    cart: Cart,
}

impl CartStore {
    /// Create a cart store following `principal_rx`.
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        principal_rx: watch::Receiver<Option<Principal>>,
    ) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                principal_rx,
                state: RwLock::new(CartState::default()),
            }),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a publication, or change the period of its existing line.
    pub fn add_item(&self, publication: &Publication, period: SubscriptionPeriod) {
        let line = CartLine::new(
            publication.id,
            publication.title.clone(),
            publication.price_per_month,
            period,
        );
        let id = publication.id.to_string();
        self.mutate("Added item", &id, |cart| {
            cart.upsert(line);
            true
        });
    }

    /// Remove the line for `publication_id` if its period is `period`.
    pub fn remove_item(&self, publication_id: PublicationId, period: SubscriptionPeriod) {
        self.mutate("Removed item", &publication_id.to_string(), |cart| {
            cart.remove(publication_id, period)
        });
    }

    /// Change the period of a line. Absent publications are ignored.
    pub fn update_period(&self, publication_id: PublicationId, period: SubscriptionPeriod) {
        self.mutate("Changed period", &publication_id.to_string(), |cart| {
            cart.set_period(publication_id, period)
        });
    }

    /// Empty the cart and delete its persisted record.
    pub fn clear(&self) {
        self.clear_where(|_| true);
    }

    /// Clear only if `owner` still holds the cart.
    ///
    /// Used after an awaited checkout, during which the principal may change.
    pub fn clear_for(&self, owner: &Email) {
        self.clear_where(|current| current == owner);
    }

    fn clear_where(&self, owner_matches: impl FnOnce(&Email) -> bool) {
        let mut state = self.reconciled();
        let Some(owner) = state.owner.clone() else {
            debug!("Cart clear ignored, no principal");
            return;
        };
        if !owner_matches(&owner) {
            debug!("Cart clear ignored, owner changed");
            return;
        }

        if let Err(e) = self.store_for(owner).remove() {
            warn!(error = %e, "Failed to delete persisted cart, keeping contents");
            return;
        }
        state.cart = Cart::new();
        add_breadcrumb("cart", "Cleared cart", None);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of line totals, rounded to two decimal places.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.reconciled().cart.total_price()
    }

    /// Total formatted with exactly two decimals.
    #[must_use]
    pub fn total_price_display(&self) -> String {
        self.total_price().to_string()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.reconciled().cart.len()
    }

    /// Snapshot of the lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.reconciled().cart.lines().to_vec()
    }

    /// Snapshot of the whole cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.reconciled().cart.clone()
    }

    /// Owner of the cart currently held.
    #[must_use]
    pub fn owner(&self) -> Option<Email> {
        self.reconciled().owner.clone()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn store_for(&self, owner: Email) -> Store<CartKey> {
        Store::new(Arc::clone(&self.inner.storage), &CartKey::new(owner))
    }

    /// Lock the state after aligning it with the latest principal.
    fn reconciled(&self) -> RwLockWriteGuard<'_, CartState> {
        let current = self
            .inner
            .principal_rx
            .borrow()
            .as_ref()
            .map(|p| p.email.clone());
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if state.owner != current {
            state.cart = current.clone().map_or_else(Cart::new, |owner| self.load(owner));
            debug!(owner = ?current, lines = state.cart.len(), "Cart owner changed");
            state.owner = current;
        }
        state
    }

    fn load(&self, owner: Email) -> Cart {
        match self.store_for(owner).load() {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Persisted cart unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Apply `change` to a copy, persist it, then swap it in.
    ///
    /// `change` returns whether it modified the cart.
    fn mutate(&self, action: &str, publication_id: &str, change: impl FnOnce(&mut Cart) -> bool) {
        let mut state = self.reconciled();
        let Some(owner) = state.owner.clone() else {
            debug!(action, "Cart mutation ignored, no principal");
            return;
        };

        let mut next = state.cart.clone();
        if !change(&mut next) {
            return;
        }

        match self.store_for(owner).save(&next) {
            Ok(()) => {
                state.cart = next;
                add_breadcrumb("cart", action, Some(&[("publication_id", publication_id)]));
            }
            Err(e) => warn!(error = %e, action, "Failed to persist cart, keeping previous contents"),
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("CartStore")
            .field("owner", &state.owner)
            .field("lines", &state.cart.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use periodica_core::Role;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    use super::SubscriptionPeriod::{OneMonth, SixMonths, ThreeMonths, TwelveMonths};

    fn publication(id: i64, price: i64) -> Publication {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Publication {id}"),
            "pricePerMonth": price
        }))
        .unwrap()
    }

    fn principal(email: &str) -> Principal {
        Principal::new(Email::parse(email).unwrap(), Role::User)
    }

    fn setup() -> (
        Arc<MemoryStorage>,
        watch::Sender<Option<Principal>>,
        CartStore,
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let (tx, rx) = watch::channel(None);
        let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>, rx);
        (storage, tx, cart)
    }

    #[test]
    fn test_no_principal_is_noop() {
        let (storage, _tx, cart) = setup();
        cart.add_item(&publication(1, 10), OneMonth);
        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_add_same_publication_overwrites() {
        let (_storage, tx, cart) = setup();
        tx.send_replace(Some(principal("a@x.com")));

        cart.add_item(&publication(7, 100), ThreeMonths);
        cart.add_item(&publication(7, 100), SixMonths);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].period(), SixMonths);
        assert_eq!(lines[0].total_price(), Price::from_units(600));
        assert_eq!(cart.total_price_display(), "600.00");
    }

    #[test]
    fn test_remove_only_exact_match() {
        let (_storage, tx, cart) = setup();
        tx.send_replace(Some(principal("a@x.com")));
        cart.add_item(&publication(7, 100), ThreeMonths);

        cart.remove_item(PublicationId::new(7), TwelveMonths);
        assert_eq!(cart.item_count(), 1);

        cart.remove_item(PublicationId::new(7), ThreeMonths);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_update_period_persists() {
        let (storage, tx, cart) = setup();
        tx.send_replace(Some(principal("a@x.com")));
        cart.add_item(&publication(7, 100), OneMonth);
        cart.update_period(PublicationId::new(7), TwelveMonths);
        cart.update_period(PublicationId::new(8), TwelveMonths);

        let stored = storage.get("cart_a@x.com").unwrap().unwrap();
        let stored: Cart = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.lines()[0].period(), TwelveMonths);
        assert_eq!(cart.total_price(), Price::from_units(1200));
    }

    #[test]
    fn test_switching_principal_isolates_carts() {
        let (_storage, tx, cart) = setup();

        tx.send_replace(Some(principal("a@x.com")));
        cart.add_item(&publication(1, 10), OneMonth);
        cart.add_item(&publication(2, 20), OneMonth);

        tx.send_replace(Some(principal("b@x.com")));
        assert_eq!(cart.item_count(), 0);
        cart.add_item(&publication(3, 30), OneMonth);

        tx.send_replace(None);
        assert_eq!(cart.item_count(), 0);
        assert!(cart.owner().is_none());

        tx.send_replace(Some(principal("a@x.com")));
        let ids: Vec<i64> = cart
            .lines()
            .iter()
            .map(|l| l.publication_id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_clear_deletes_record() {
        let (storage, tx, cart) = setup();
        tx.send_replace(Some(principal("a@x.com")));
        cart.add_item(&publication(1, 10), OneMonth);
        assert!(storage.get("cart_a@x.com").unwrap().is_some());

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert!(storage.get("cart_a@x.com").unwrap().is_none());
    }

    #[test]
    fn test_clear_for_other_owner_is_ignored() {
        let (_storage, tx, cart) = setup();
        tx.send_replace(Some(principal("b@x.com")));
        cart.add_item(&publication(1, 10), OneMonth);

        cart.clear_for(&Email::parse("a@x.com").unwrap());
        assert_eq!(cart.item_count(), 1);

        cart.clear_for(&Email::parse("b@x.com").unwrap());
        assert_eq!(cart.item_count(), 0);
    }

    /// Store whose writes always fail.
    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_storage_failure_keeps_cart_unchanged() {
        let (tx, rx) = watch::channel(Some(principal("a@x.com")));
        let cart = CartStore::new(Arc::new(ReadOnlyStorage), rx);

        cart.add_item(&publication(1, 10), OneMonth);
        assert_eq!(cart.item_count(), 0);
        drop(tx);
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        let (storage, tx, cart) = setup();
        storage.set("cart_a@x.com", "{broken").unwrap();
        tx.send_replace(Some(principal("a@x.com")));
        assert_eq!(cart.item_count(), 0);

        cart.add_item(&publication(1, 10), OneMonth);
        assert_eq!(cart.item_count(), 1);
    }
}

//! Shared setup for storefront integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use periodica_integration_tests::{FakeBackend, RecordedRequest};
use periodica_storefront::Storefront;
use periodica_storefront::config::StorefrontConfig;
use periodica_storefront::storage::{KeyValueStore, MemoryStorage};
use secrecy::SecretString;

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";
pub const PASSWORD: &str = "secret1";

/// Backend with two regular accounts.
pub async fn backend() -> FakeBackend {
    let backend = FakeBackend::start()
        .await
        .expect("Failed to start fake backend");
    backend.add_account(ALICE, PASSWORD, "USER");
    backend.add_account(BOB, PASSWORD, "USER");
    backend
}

/// Client on fresh in-memory storage.
pub fn storefront(backend: &FakeBackend) -> (Storefront, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let client = storefront_on(backend, Arc::clone(&storage) as Arc<dyn KeyValueStore>);
    (client, storage)
}

/// Client on the given storage.
pub fn storefront_on(backend: &FakeBackend, storage: Arc<dyn KeyValueStore>) -> Storefront {
    let config =
        StorefrontConfig::for_base_url(&backend.base_url()).expect("Invalid fake backend URL");
    Storefront::with_storage(config, storage).expect("Failed to build storefront")
}

pub fn password() -> SecretString {
    SecretString::from(PASSWORD)
}

pub async fn login(client: &Storefront, email: &str) {
    client
        .session()
        .login(email, &password())
        .await
        .expect("Login failed");
}

/// Most recent request the backend received.
pub fn last_request(backend: &FakeBackend) -> RecordedRequest {
    backend
        .requests()
        .pop()
        .expect("Backend received no requests")
}

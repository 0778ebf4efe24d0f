//! Server-side cart endpoints against the backend.

mod common;

use periodica_core::SubscriptionPeriod::{OneMonth, ThreeMonths};
use periodica_core::{CartItemId, PublicationId};
use periodica_storefront::ClientError;
use serde_json::json;

use common::{ALICE, BOB, backend, last_request, login, storefront};

#[tokio::test]
async fn test_add_then_get() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let empty = client.remote_cart().get().await.expect("Cart request failed");
    assert!(empty.items.is_empty());
    assert_eq!(last_request(&backend).path, "/api/cart");

    client
        .remote_cart()
        .add(PublicationId::new(2), ThreeMonths)
        .await
        .expect("Add failed");

    let request = last_request(&backend);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/cart/add");
    assert_eq!(
        request.body,
        Some(json!({ "publicationId": 2, "subscriptionPeriod": 3 }))
    );

    let cart = client.remote_cart().get().await.expect("Cart request failed");
    assert_eq!(cart.items.len(), 1);
    let item = &cart.items[0];
    assert_eq!(
        item.publication.as_ref().map(|p| p.id),
        Some(PublicationId::new(2))
    );
    assert_eq!(item.subscription_period, Some(ThreeMonths));

    // The client-side cart is separate.
    assert_eq!(client.cart().item_count(), 0);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    for id in [1, 2, 3] {
        client
            .remote_cart()
            .add(PublicationId::new(id), OneMonth)
            .await
            .expect("Add failed");
    }
    let cart = client.remote_cart().get().await.expect("Cart request failed");
    let removed = cart.items[0].id;

    client
        .remote_cart()
        .remove(removed)
        .await
        .expect("Remove failed");

    let request = last_request(&backend);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, format!("/api/cart/items/{removed}"));
    assert_eq!(backend.cart_of(ALICE).len(), 2);

    client.remote_cart().clear().await.expect("Clear failed");

    let request = last_request(&backend);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/cart/clear");
    assert!(backend.cart_of(ALICE).is_empty());
}

#[tokio::test]
async fn test_server_carts_are_per_user() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;
    client
        .remote_cart()
        .add(PublicationId::new(1), OneMonth)
        .await
        .expect("Add failed");

    login(&client, BOB).await;
    let cart = client.remote_cart().get().await.expect("Cart request failed");

    assert!(cart.items.is_empty());
    assert_eq!(backend.cart_of(ALICE).len(), 1);
}

#[tokio::test]
async fn test_unknown_items_are_api_errors() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let err = client
        .remote_cart()
        .add(PublicationId::new(42), OneMonth)
        .await
        .expect_err("Add should fail");
    assert!(matches!(err, ClientError::Api { status: 404, .. }));

    let err = client
        .remote_cart()
        .remove(CartItemId::new(42))
        .await
        .expect_err("Remove should fail");
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(err.user_message(), "Cart item not found");
}

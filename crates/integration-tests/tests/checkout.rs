//! Checkout from the client-side cart.

mod common;

use periodica_core::PublicationId;
use periodica_core::SubscriptionPeriod::{OneMonth, TwelveMonths};
use periodica_storefront::backend::SubscriptionFilter;
use periodica_storefront::{CheckoutOutcome, ClientError};

use common::{ALICE, backend, login, storefront};

#[tokio::test]
async fn test_checkout_creates_subscriptions_and_clears_cart() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let publications = client
        .catalog()
        .publications()
        .await
        .expect("Catalog request failed");
    client.cart().add_item(&publications[0], TwelveMonths);
    client.cart().add_item(&publications[1], OneMonth);

    let outcome = client.checkout().await.expect("Checkout failed");
    assert_eq!(outcome, CheckoutOutcome::Submitted { lines: 2 });
    assert_eq!(client.cart().item_count(), 0);

    let created = backend.subscriptions_of(ALICE);
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["subscriptionPeriod"], 12);

    let subscriptions = client
        .subscriptions()
        .list(SubscriptionFilter::All)
        .await
        .expect("Listing subscriptions failed");
    assert_eq!(subscriptions.len(), 2);
    assert!(
        subscriptions
            .iter()
            .any(|s| s.publication.id == PublicationId::new(2))
    );
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let publications = client
        .catalog()
        .publications()
        .await
        .expect("Catalog request failed");
    client.cart().add_item(&publications[2], OneMonth);

    backend.fail_checkout(true);
    let err = client.checkout().await.expect_err("Checkout should fail");

    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.user_message(), "Checkout unavailable");
    assert_eq!(client.cart().item_count(), 1);
    assert!(client.session().is_authenticated());
    assert!(backend.subscriptions_of(ALICE).is_empty());
}

#[tokio::test]
async fn test_checkout_with_empty_cart_sends_nothing() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let outcome = client.checkout().await.expect("Checkout failed");

    assert_eq!(outcome, CheckoutOutcome::NothingToCheckout);
    assert!(backend.seen_authorization().is_empty());
}

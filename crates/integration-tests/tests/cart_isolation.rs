//! Per-user cart persistence across logins and forced logouts.

mod common;

use periodica_core::SubscriptionPeriod::{OneMonth, SixMonths, ThreeMonths};
use periodica_core::{Price, PublicationId};
use periodica_storefront::ClientError;
use periodica_storefront::backend::SubscriptionFilter;
use periodica_storefront::models::Publication;
use periodica_storefront::storage::KeyValueStore;
use periodica_storefront::Storefront;

use common::{ALICE, BOB, backend, login, storefront};

async fn catalog(client: &Storefront) -> Vec<Publication> {
    client
        .catalog()
        .publications()
        .await
        .expect("Catalog request failed")
        .to_vec()
}

fn find(publications: &[Publication], id: i64) -> &Publication {
    publications
        .iter()
        .find(|p| p.id == PublicationId::new(id))
        .expect("Publication missing from catalog")
}

#[tokio::test]
async fn test_carts_are_isolated_per_user() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);

    login(&client, ALICE).await;
    let publications = catalog(&client).await;
    client.cart().add_item(find(&publications, 1), ThreeMonths);
    assert_eq!(client.cart().item_count(), 1);
    client.session().logout();
    assert_eq!(client.cart().item_count(), 0);

    login(&client, BOB).await;
    assert_eq!(client.cart().item_count(), 0);
    client.cart().add_item(find(&publications, 2), OneMonth);
    client.cart().add_item(find(&publications, 3), SixMonths);
    assert_eq!(client.cart().item_count(), 2);
    client.session().logout();

    login(&client, ALICE).await;
    let lines = client.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].publication_id, PublicationId::new(1));
    assert_eq!(lines[0].period(), ThreeMonths);
    assert_eq!(client.cart().total_price_display(), "29.97");
}

#[tokio::test]
async fn test_cart_follows_login_without_logout() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);

    login(&client, ALICE).await;
    let publications = catalog(&client).await;
    client.cart().add_item(find(&publications, 1), OneMonth);

    login(&client, BOB).await;
    assert_eq!(client.cart().item_count(), 0);
    assert_eq!(client.cart().owner().map(|e| e.into_inner()), Some(BOB.to_string()));
}

#[tokio::test]
async fn test_cart_ignored_without_principal() {
    let backend = backend().await;
    let (client, storage) = storefront(&backend);

    login(&client, ALICE).await;
    let publications = catalog(&client).await;
    client.session().logout();

    client.cart().add_item(find(&publications, 1), OneMonth);
    assert_eq!(client.cart().item_count(), 0);
    assert_eq!(client.cart().total_price(), Price::ZERO);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_rejected_token_ends_session_and_hides_cart() {
    let backend = backend().await;
    let (client, storage) = storefront(&backend);

    login(&client, ALICE).await;
    let publications = catalog(&client).await;
    client.cart().add_item(find(&publications, 2), ThreeMonths);

    backend.revoke_all_tokens();
    let err = client
        .subscriptions()
        .list(SubscriptionFilter::All)
        .await
        .expect_err("Revoked token must be refused");

    assert!(matches!(err, ClientError::AuthorizationLost));
    assert!(!client.session().is_authenticated());
    assert!(!client.session().signing_policy().is_signed());
    assert_eq!(client.cart().item_count(), 0);
    assert!(storage.get("token").expect("Read failed").is_none());
    assert!(storage
        .get(&format!("cart_{ALICE}"))
        .expect("Read failed")
        .is_some());

    login(&client, ALICE).await;
    assert_eq!(client.cart().item_count(), 1);
    assert_eq!(client.cart().lines()[0].period(), ThreeMonths);
}

//! Profile endpoints against the backend.

mod common;

use periodica_storefront::ClientError;
use periodica_storefront::models::{PasswordChange, ProfileUpdate};
use secrecy::SecretString;
use serde_json::json;

use common::{ALICE, PASSWORD, backend, last_request, login, storefront};

fn update() -> ProfileUpdate {
    ProfileUpdate {
        name: " Alice ".to_string(),
        address: "Lenina 1, flat 4".to_string(),
        city: "Kazan".to_string(),
        postal_code: "420000".to_string(),
        phone_number: "+79991234567".to_string(),
    }
}

fn change(current: &str, new: &str) -> PasswordChange {
    PasswordChange {
        current_password: SecretString::from(current),
        new_password: SecretString::from(new),
    }
}

#[tokio::test]
async fn test_get_profile() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let profile = client.profile().get().await.expect("Profile request failed");

    assert_eq!(profile.email, ALICE);
    assert!(profile.city.is_none());
    let request = last_request(&backend);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/users/profile");
}

#[tokio::test]
async fn test_update_sends_trimmed_fields() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let profile = client
        .profile()
        .update(update())
        .await
        .expect("Profile update failed");
    assert_eq!(profile.name.as_deref(), Some("Alice"));

    let request = last_request(&backend);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/users/profile");
    assert_eq!(
        request.body,
        Some(json!({
            "name": "Alice",
            "address": "Lenina 1, flat 4",
            "city": "Kazan",
            "postalCode": "420000",
            "phoneNumber": "+79991234567"
        }))
    );

    let reloaded = client.profile().get().await.expect("Profile request failed");
    assert_eq!(reloaded.postal_code.as_deref(), Some("420000"));
}

#[tokio::test]
async fn test_invalid_update_is_not_sent() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;
    let sent_before = backend.requests().len();

    let mut invalid = update();
    invalid.postal_code = "4200".to_string();
    let err = client
        .profile()
        .update(invalid)
        .await
        .expect_err("Update should be rejected");

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.user_message(), "Postal code must be 6 digits");
    assert_eq!(backend.requests().len(), sent_before);
}

// =============================================================================
// Password change
// =============================================================================

#[tokio::test]
async fn test_change_password_then_login_with_new_one() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    client
        .profile()
        .change_password(&change(PASSWORD, "fresh-pass"))
        .await
        .expect("Password change failed");

    let request = last_request(&backend);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/users/change-password");
    assert_eq!(
        request.body,
        Some(json!({ "currentPassword": PASSWORD, "newPassword": "fresh-pass" }))
    );

    client.session().logout();
    let old = client
        .session()
        .login(ALICE, &SecretString::from(PASSWORD))
        .await;
    assert!(old.is_err());
    client
        .session()
        .login(ALICE, &SecretString::from("fresh-pass"))
        .await
        .expect("Login with new password failed");
}

#[tokio::test]
async fn test_wrong_current_password_keeps_session() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;

    let err = client
        .profile()
        .change_password(&change("not-it", "fresh-pass"))
        .await
        .expect_err("Password change should fail");

    assert!(matches!(err, ClientError::Api { status: 400, .. }));
    assert_eq!(err.user_message(), "Current password is incorrect");
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_short_new_password_is_not_sent() {
    let backend = backend().await;
    let (client, _storage) = storefront(&backend);
    login(&client, ALICE).await;
    let sent_before = backend.requests().len();

    let err = client
        .profile()
        .change_password(&change(PASSWORD, "12345"))
        .await
        .expect_err("Password change should be rejected");

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(backend.requests().len(), sent_before);
}

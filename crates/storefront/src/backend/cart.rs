//! Server-side cart endpoints.
//!
//! The storefront checks out from the client-side cart; this server copy is
//! exposed for render layers that sync with it.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use periodica_core::{CartItemId, Price, PublicationId, SubscriptionPeriod};

use super::HttpGateway;
use crate::error::Result;
use crate::models::Publication;

const CART_PATH: &str = "api/cart";

/// The server's cart for the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Vec<RemoteCartItem>,
}

/// One line of the server's cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartItem {
    pub id: CartItemId,
    #[serde(default)]
    pub publication: Option<Publication>,
    #[serde(default)]
    pub subscription_period: Option<SubscriptionPeriod>,
    #[serde(default)]
    pub total_price: Option<Price>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest {
    publication_id: PublicationId,
    subscription_period: SubscriptionPeriod,
}

/// Server-side cart endpoints.
#[derive(Debug, Clone)]
pub struct RemoteCartApi {
    gateway: HttpGateway,
}

impl RemoteCartApi {
    #[must_use]
    pub const fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// Fetch the server cart.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<RemoteCart> {
        self.gateway.get(CART_PATH).await
    }

    /// Add a publication to the server cart.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(publication_id = %publication_id))]
    pub async fn add(
        &self,
        publication_id: PublicationId,
        period: SubscriptionPeriod,
    ) -> Result<()> {
        self.gateway
            .execute(
                Method::POST,
                &format!("{CART_PATH}/add"),
                Some(&AddToCartRequest {
                    publication_id,
                    subscription_period: period,
                }),
            )
            .await
    }

    /// Remove a line from the server cart.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove(&self, item_id: CartItemId) -> Result<()> {
        self.gateway
            .delete(&format!("{CART_PATH}/items/{item_id}"))
            .await
    }

    /// Empty the server cart.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.gateway
            .execute(Method::POST, &format!("{CART_PATH}/clear"), None::<&()>)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_cart_shape() {
        let json = r#"{
            "id": 4,
            "items": [{
                "id": 9,
                "publication": {"id": 7, "title": "T", "pricePerMonth": 100},
                "subscriptionPeriod": 3,
                "totalPrice": 300.0
            }]
        }"#;
        let cart: RemoteCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, CartItemId::new(9));
        assert_eq!(
            cart.items[0].subscription_period,
            Some(SubscriptionPeriod::ThreeMonths)
        );

        let empty: RemoteCart = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_add_request_shape() {
        let body = serde_json::to_value(AddToCartRequest {
            publication_id: PublicationId::new(7),
            subscription_period: SubscriptionPeriod::TwelveMonths,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"publicationId": 7, "subscriptionPeriod": 12})
        );
    }
}

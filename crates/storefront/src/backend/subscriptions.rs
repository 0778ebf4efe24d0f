//! Subscription management endpoints.

use reqwest::Method;
use tracing::{info, instrument};

use periodica_core::{Cart, PublicationId, SubscriptionId, SubscriptionPeriod};

use super::HttpGateway;
use crate::error::Result;
use crate::models::subscription::{
    CreateFromCartRequest, SubscriptionRequest, UpdatePeriodRequest,
};
use crate::models::{ActiveSubscriptionCheck, Subscription};

const SUBSCRIPTIONS_PATH: &str = "api/subscriptions";

/// Which of the user's subscriptions to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionFilter {
    All,
    Active,
    Inactive,
}

impl SubscriptionFilter {
    const fn segment(self) -> &'static str {
        match self {
            Self::All => "my",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Subscription endpoints. All require a logged-in user.
#[derive(Debug, Clone)]
pub struct SubscriptionsApi {
    gateway: HttpGateway,
}

impl SubscriptionsApi {
    #[must_use]
    pub const fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// The user's subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: SubscriptionFilter) -> Result<Vec<Subscription>> {
        self.gateway
            .get(&format!("{SUBSCRIPTIONS_PATH}/{}", filter.segment()))
            .await
    }

    /// Turn every cart line into a subscription in one request.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self, cart), fields(lines = cart.len()))]
    pub async fn create_from_cart(&self, cart: &Cart) -> Result<()> {
        let request = CreateFromCartRequest {
            subscriptions: cart
                .lines()
                .iter()
                .map(|line| SubscriptionRequest {
                    publication_id: line.publication_id,
                    quantity: 1,
                    subscription_period: line.period(),
                    total_price: line.total_price(),
                })
                .collect(),
        };

        self.gateway
            .execute(
                Method::POST,
                &format!("{SUBSCRIPTIONS_PATH}/create-from-cart"),
                Some(&request),
            )
            .await?;
        info!(lines = cart.len(), "Subscriptions created from cart");
        Ok(())
    }

    /// Extend a subscription by its current period.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(subscription_id = %id))]
    pub async fn extend(&self, id: SubscriptionId) -> Result<()> {
        self.gateway
            .execute(
                Method::POST,
                &format!("{SUBSCRIPTIONS_PATH}/{id}/extend"),
                None::<&()>,
            )
            .await
    }

    /// Cancel a subscription.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(subscription_id = %id))]
    pub async fn cancel(&self, id: SubscriptionId) -> Result<()> {
        self.gateway
            .delete(&format!("{SUBSCRIPTIONS_PATH}/{id}"))
            .await
    }

    /// Change the period of a subscription.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(subscription_id = %id, months = period.months()))]
    pub async fn update_period(&self, id: SubscriptionId, period: SubscriptionPeriod) -> Result<()> {
        self.gateway
            .execute(
                Method::PUT,
                &format!("{SUBSCRIPTIONS_PATH}/{id}/period"),
                Some(&UpdatePeriodRequest {
                    subscription_period: period,
                }),
            )
            .await
    }

    /// Whether the user already holds an active subscription to a publication.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self), fields(publication_id = %publication_id))]
    pub async fn check_active(&self, publication_id: PublicationId) -> Result<ActiveSubscriptionCheck> {
        self.gateway
            .get(&format!("{SUBSCRIPTIONS_PATH}/check/{publication_id}"))
            .await
    }
}

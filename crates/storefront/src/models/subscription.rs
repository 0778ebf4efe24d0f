//! Subscription resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use periodica_core::{Price, PublicationId, SubscriptionId, SubscriptionPeriod};

use super::Publication;

/// A subscription held by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub publication: Publication,
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subscription_period: Option<SubscriptionPeriod>,
    pub total_price: Price,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// One line of a create-from-cart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub publication_id: PublicationId,
    pub quantity: u32,
    pub subscription_period: SubscriptionPeriod,
    pub total_price: Price,
}

/// Body of `POST /api/subscriptions/create-from-cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFromCartRequest {
    pub subscriptions: Vec<SubscriptionRequest>,
}

/// Body of `PUT /api/subscriptions/{id}/period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePeriodRequest {
    pub subscription_period: SubscriptionPeriod,
}

/// Answer of `GET /api/subscriptions/check/{publicationId}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSubscriptionCheck {
    pub has_active_subscription: bool,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,
}

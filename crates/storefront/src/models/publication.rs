//! Catalog publication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use periodica_core::{Price, PublicationId, PublicationType};

/// A magazine or newspaper offered for subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: PublicationId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(rename = "type", default)]
    pub publication_type: PublicationType,
    pub price_per_month: Price,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

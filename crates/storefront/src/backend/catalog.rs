//! Publication catalog with cached listing and client-side filtering.
//!
//! The backend has no search parameters; the whole catalog is fetched once,
//! cached with `moka`, and [`CatalogQuery`] narrows and orders it locally.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, instrument};

use periodica_core::{Price, PublicationId, PublicationType};

use super::HttpGateway;
use crate::error::Result;
use crate::models::Publication;

const PUBLICATIONS_PATH: &str = "api/publications";
const ALL_PUBLICATIONS_KEY: &str = "publications:all";

/// Lower bound of the default price filter.
pub const DEFAULT_MIN_PRICE: i64 = 0;
/// Upper bound of the default price filter.
pub const DEFAULT_MAX_PRICE: i64 = 1000;

/// Shapes the listing endpoint has been seen to return.
#[derive(Deserialize)]
#[serde(untagged)]
enum PublicationListing {
    List(Vec<Publication>),
    Page { content: Vec<Publication> },
    Wrapped { publications: Vec<Publication> },
}

impl From<PublicationListing> for Vec<Publication> {
    fn from(listing: PublicationListing) -> Self {
        match listing {
            PublicationListing::List(list)
            | PublicationListing::Page { content: list }
            | PublicationListing::Wrapped { publications: list } => list,
        }
    }
}

// =============================================================================
// CatalogApi
// =============================================================================

/// Catalog endpoints.
#[derive(Clone)]
pub struct CatalogApi {
    gateway: HttpGateway,
    cache: Cache<String, Arc<Vec<Publication>>>,
}

impl CatalogApi {
    /// Create a catalog client caching listings for `ttl`.
    #[must_use]
    pub fn new(gateway: HttpGateway, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(16).time_to_live(ttl).build();
        Self { gateway, cache }
    }

    /// Every publication, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error when the listing cannot be fetched.
    #[instrument(skip(self))]
    pub async fn publications(&self) -> Result<Arc<Vec<Publication>>> {
        if let Some(cached) = self.cache.get(ALL_PUBLICATIONS_KEY).await {
            debug!(count = cached.len(), "Catalog cache hit");
            return Ok(cached);
        }

        let listing: PublicationListing = self.gateway.get(PUBLICATIONS_PATH).await?;
        let publications = Arc::new(Vec::from(listing));
        debug!(count = publications.len(), "Fetched catalog");

        self.cache
            .insert(ALL_PUBLICATIONS_KEY.to_string(), Arc::clone(&publications))
            .await;
        Ok(publications)
    }

    /// Publications matching `query`, in its order.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error when the listing cannot be fetched.
    pub async fn search(&self, query: &CatalogQuery) -> Result<Vec<Publication>> {
        let publications = self.publications().await?;
        Ok(query.apply(&publications))
    }

    /// A single publication by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 when it does not exist.
    #[instrument(skip(self), fields(publication_id = %id))]
    pub async fn publication(&self, id: PublicationId) -> Result<Publication> {
        self.gateway.get(&format!("{PUBLICATIONS_PATH}/{id}")).await
    }

    /// Drop cached listings.
    pub async fn invalidate(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// CatalogQuery
// =============================================================================

/// Sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Price,
    Date,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Client-side catalog filter and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of title or description.
    pub search: String,
    pub publication_type: Option<PublicationType>,
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    /// Matches publications carrying any of these tags. Empty matches all.
    pub tags: Vec<String>,
    pub sort_by: SortKey,
    pub direction: SortDirection,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            publication_type: None,
            min_price: Price::from_units(DEFAULT_MIN_PRICE),
            max_price: Price::from_units(DEFAULT_MAX_PRICE),
            tags: Vec::new(),
            sort_by: SortKey::default(),
            direction: SortDirection::default(),
        }
    }
}

impl CatalogQuery {
    /// Whether `publication` passes every filter.
    #[must_use]
    pub fn matches(&self, publication: &Publication) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || publication.title.to_lowercase().contains(&needle)
            || publication.description.to_lowercase().contains(&needle);

        let type_ok = self
            .publication_type
            .is_none_or(|t| t == publication.publication_type);

        let price = publication.price_per_month;
        let price_ok = price >= self.min_price && price <= self.max_price;

        let tags_ok = self.tags.is_empty()
            || publication
                .tags
                .iter()
                .any(|tag| self.tags.iter().any(|wanted| wanted.eq_ignore_ascii_case(tag)));

        text_ok && type_ok && price_ok && tags_ok
    }

    /// Filter and sort `publications`.
    #[must_use]
    pub fn apply(&self, publications: &[Publication]) -> Vec<Publication> {
        let mut selected: Vec<Publication> = publications
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        selected.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        selected
    }

    fn compare(&self, a: &Publication, b: &Publication) -> Ordering {
        match self.sort_by {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Price => a.price_per_month.cmp(&b.price_per_month),
            // Undated publications sort first.
            SortKey::Date => a.created_at.cmp(&b.created_at),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn publication(id: i64, title: &str, price: i64, kind: &str, date: &str, tags: &[&str]) -> Publication {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": format!("About {title}"),
            "type": kind,
            "pricePerMonth": price,
            "createdAt": date,
            "tags": tags,
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Publication> {
        vec![
            publication(1, "Zoo Life", 300, "MAGAZINE", "2024-03-01T00:00:00", &["animals"]),
            publication(2, "Daily News", 50, "NEWSPAPER", "2024-01-01T00:00:00", &["news"]),
            publication(3, "art review", 1200, "MAGAZINE", "2024-02-01T00:00:00", &["art", "culture"]),
        ]
    }

    fn ids(publications: &[Publication]) -> Vec<i64> {
        publications.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_default_query_filters_price_and_sorts_by_title() {
        let result = CatalogQuery::default().apply(&catalog());
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let query = CatalogQuery {
            search: "  NEWS ".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog())), vec![2]);

        let by_description = CatalogQuery {
            search: "about zoo".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&by_description.apply(&catalog())), vec![1]);
    }

    #[test]
    fn test_type_tags_and_price_range() {
        let query = CatalogQuery {
            publication_type: Some(PublicationType::Magazine),
            max_price: Price::from_units(2000),
            tags: vec!["culture".to_string(), "sports".to_string()],
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&catalog())), vec![3]);

        let bounds = CatalogQuery {
            min_price: Price::from_units(50),
            max_price: Price::from_units(50),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&bounds.apply(&catalog())), vec![2]);
    }

    #[test]
    fn test_sort_by_price_and_date_descending() {
        let wide = CatalogQuery {
            max_price: Price::from_units(5000),
            sort_by: SortKey::Price,
            direction: SortDirection::Descending,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&wide.apply(&catalog())), vec![3, 1, 2]);

        let by_date = CatalogQuery {
            max_price: Price::from_units(5000),
            sort_by: SortKey::Date,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&by_date.apply(&catalog())), vec![2, 3, 1]);
    }

    #[test]
    fn test_listing_shapes() {
        let item = r#"{"id":1,"title":"T","pricePerMonth":10}"#;
        for json in [
            format!("[{item}]"),
            format!(r#"{{"content":[{item}],"totalElements":1}}"#),
            format!(r#"{{"publications":[{item}]}}"#),
        ] {
            let listing: PublicationListing = serde_json::from_str(&json).unwrap();
            assert_eq!(Vec::from(listing).len(), 1);
        }
    }
}

//! REST backend access.
//!
//! # Architecture
//!
//! - [`HttpGateway`] is the only component that sends requests for backend
//!   resources; it signs them with the session's policy and ends the session
//!   on 401
//! - Endpoint wrappers ([`CatalogApi`], [`SubscriptionsApi`],
//!   [`RemoteCartApi`], [`ProfileApi`]) hold a gateway clone and map
//!   resources to typed models
//! - Catalog listings are cached in memory via `moka`
//!
//! Authentication endpoints live in [`crate::services::auth`] because they
//! run before a session exists.

pub mod cart;
pub mod catalog;
pub mod client;
pub mod profile;
pub mod subscriptions;

pub use cart::RemoteCartApi;
pub use catalog::{CatalogApi, CatalogQuery, SortDirection, SortKey};
pub use client::HttpGateway;
pub use profile::ProfileApi;
pub use subscriptions::{SubscriptionFilter, SubscriptionsApi};

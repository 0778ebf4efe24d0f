//! Periodica Core - Shared domain types.
//!
//! This crate provides the types shared by every Periodica component:
//! - `storefront` - Client core (session, cart, routing, REST gateway)
//! - `integration-tests` - End-to-end scenarios against a fake backend
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no
//! storage, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, roles, periods,
//!   principals and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Periodica storefront client core.
//!
//! Session lifecycle, per-user cart persistence, role-gated routing and the
//! signed HTTP gateway to the subscription backend. A render layer drives
//! these types and displays their state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod signing;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod token;

pub use error::{ClientError, Result};
pub use state::{CheckoutOutcome, Storefront};

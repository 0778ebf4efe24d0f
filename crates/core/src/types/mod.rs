//! Core types for Periodica.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod period;
pub mod price;
pub mod principal;
pub mod role;
pub mod status;

pub use cart::{Cart, CartLine};
pub use email::{Email, EmailError};
pub use id::*;
pub use period::{PeriodError, SubscriptionPeriod};
pub use price::Price;
pub use principal::Principal;
pub use role::Role;
pub use status::*;

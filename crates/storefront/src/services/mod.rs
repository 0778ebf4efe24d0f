//! Client services.
//!
//! # Services
//!
//! - `auth` - Backend authentication endpoints (login, refresh, signup)
//! - `session` - Token lifecycle, persistence and principal publication
//! - `cart` - Per-user client-side cart

pub mod auth;
pub mod cart;
pub mod session;

pub use cart::CartStore;
pub use session::SessionStore;

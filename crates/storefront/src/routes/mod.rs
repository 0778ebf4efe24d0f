//! Navigation table.
//!
//! # Routes
//!
//! ## Public
//! - `/login` - Login form
//! - `/signup` - Account creation
//! - `/unauthorized` - Shown when the role is not allowed
//!
//! ## Protected (`USER` / `ROLE_USER`)
//! - `/publications` - Catalog
//! - `/cart` - Pending subscriptions
//! - `/profile` - Profile and subscriptions
//!
//! `/` redirects to `/login`; anything else is not found.

pub mod guard;

pub use guard::{GuardDecision, RouteGuard, authorize};

use periodica_core::Principal;

/// Roles admitted to protected routes.
pub const PROTECTED_ROLES: [&str; 2] = ["USER", "ROLE_USER"];

/// A known destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Unauthorized,
    Publications,
    Cart,
    Profile,
}

impl Route {
    /// Every route.
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Signup,
        Self::Unauthorized,
        Self::Publications,
        Self::Cart,
        Self::Profile,
    ];

    /// Path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Unauthorized => "/unauthorized",
            Self::Publications => "/publications",
            Self::Cart => "/cart",
            Self::Profile => "/profile",
        }
    }

    /// Whether the route needs a logged-in user with an allowed role.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Publications | Self::Cart | Self::Profile)
    }

    /// Look up a route by exact path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// What the render layer should do for a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show this route.
    Render(Route),
    /// Replace the location with this route.
    Redirect(Route),
    /// No such page.
    NotFound,
}

/// Resolve a requested path for the given principal.
///
/// Query strings, fragments and a trailing slash are ignored.
#[must_use]
pub fn resolve(path: &str, principal: Option<&Principal>) -> Navigation {
    let path = normalize(path);
    if path == "/" {
        return Navigation::Redirect(Route::Login);
    }

    let Some(route) = Route::from_path(path) else {
        return Navigation::NotFound;
    };
    if !route.is_protected() {
        return Navigation::Render(route);
    }

    match RouteGuard::new(PROTECTED_ROLES).check(principal) {
        GuardDecision::Allow => Navigation::Render(route),
        GuardDecision::RedirectToLogin => Navigation::Redirect(Route::Login),
        GuardDecision::RedirectToUnauthorized => Navigation::Redirect(Route::Unauthorized),
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

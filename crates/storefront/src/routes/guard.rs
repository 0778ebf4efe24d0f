//! Role-gated navigation.

use periodica_core::{Principal, Role};

/// Outcome of checking a principal against a route's allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the route.
    Allow,
    /// Nobody is logged in.
    RedirectToLogin,
    /// Logged in, but the role is not allowed.
    RedirectToUnauthorized,
}

/// Decide whether `principal` may enter a route allowing `required_roles`.
///
/// Roles compare in canonical form, so `ROLE_USER` and `USER` are the same
/// role. An empty `required_roles` admits nobody.
#[must_use]
pub fn authorize(principal: Option<&Principal>, required_roles: &[Role]) -> GuardDecision {
    match principal {
        None => GuardDecision::RedirectToLogin,
        Some(p) if p.has_any_role(required_roles) => GuardDecision::Allow,
        Some(_) => GuardDecision::RedirectToUnauthorized,
    }
}

/// Allowed roles of a protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    /// Build a guard from raw role names (`USER`, `ROLE_USER`, ...).
    #[must_use]
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<Role> = Vec::new();
        for role in roles {
            let role = Role::parse(role.as_ref());
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }
        Self { allowed }
    }

    /// Canonical allowed roles.
    #[must_use]
    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// See [`authorize`].
    #[must_use]
    pub fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        authorize(principal, &self.allowed)
    }
}

impl Default for RouteGuard {
    /// Guard admitting ordinary users.
    fn default() -> Self {
        Self::new(["USER"])
    }
}

//! Client route table and navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes are addressed by name (`home`, `auth.login`, ...). `guard` decides
//! whether a navigation may commit; `navigator` awaits that decision and
//! tracks the committed route.

pub mod guard;
pub mod navigator;

pub use guard::{GuardDecision, RouteGuard};
pub use navigator::{NavigationError, Navigator};

pub const HOME: &str = "home";
pub const LOGIN: &str = "auth.login";
pub const REGISTER: &str = "auth.register";
pub const DASHBOARD: &str = "dashboard";

/// Routes reachable without an authenticated session.
pub const PUBLIC_ROUTES: &[&str] = &[HOME, LOGIN, REGISTER];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
}

pub const ROUTES: &[Route] = &[
    Route { name: HOME, path: "/" },
    Route { name: REGISTER, path: "/auth/register" },
    Route { name: LOGIN, path: "/auth/login" },
    Route { name: DASHBOARD, path: "/dashboard" },
];

/// Look up a route by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == name)
}

/// Look up a route by name, or by path when `target` starts with `/`.
#[must_use]
pub fn resolve(target: &str) -> Option<&'static Route> {
    if target.starts_with('/') {
        let path = match target.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        ROUTES.iter().find(|route| route.path == path)
    } else {
        find(target)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

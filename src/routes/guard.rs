//! Navigation guard gating protected routes.
//!
//! Runs before every navigation. Allow-listed routes pass without touching
//! the network; any other known route waits on `AuthService::check_auth` and
//! is redirected to the login route when the session is not authenticated.

use std::sync::Arc;

use tracing::{debug, info};

use super::{LOGIN, PUBLIC_ROUTES};
use crate::services::auth::AuthService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Commit the navigation to the requested route.
    Allow,
    /// Navigate to the named route instead.
    Redirect { to: &'static str },
    /// The target is not a known route; leave it to not-found handling.
    Defer,
}

pub struct RouteGuard {
    auth: Arc<AuthService>,
    public: Vec<&'static str>,
}

impl RouteGuard {
    /// Guard with the default allow-list (`home`, `auth.login`, `auth.register`).
    #[must_use]
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self::with_public_routes(auth, PUBLIC_ROUTES)
    }

    #[must_use]
    pub fn with_public_routes(auth: Arc<AuthService>, public: &[&'static str]) -> Self {
        Self { auth, public: public.to_vec() }
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<AuthService> {
        &self.auth
    }

    #[must_use]
    pub fn is_public(&self, name: &str) -> bool {
        self.public.iter().any(|public| *public == name)
    }

    /// Decide the fate of a navigation to the route named `target`.
    pub async fn before_each(&self, target: &str) -> GuardDecision {
        if super::find(target).is_none() {
            debug!(route = target, "guard deferring unknown route");
            return GuardDecision::Defer;
        }
        if self.is_public(target) {
            return GuardDecision::Allow;
        }
        if self.auth.check_auth().await {
            GuardDecision::Allow
        } else {
            info!(route = target, redirect = LOGIN, "unauthenticated navigation redirected");
            GuardDecision::Redirect { to: LOGIN }
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

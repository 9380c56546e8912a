//! Minimal navigation driver.
//!
//! DESIGN
//! ======
//! `navigate` awaits the guard before committing anything, follows guard
//! redirects, and only then records the committed route. A bounded redirect
//! count keeps a misconfigured allow-list from looping forever.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::guard::{GuardDecision, RouteGuard};
use super::{Route, find};

const MAX_REDIRECTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("no route named `{0}`")]
    NotFound(String),
    #[error("too many redirects while navigating to `{0}`")]
    RedirectLoop(String),
}

pub struct Navigator {
    guard: RouteGuard,
    current: RwLock<Option<&'static Route>>,
}

impl Navigator {
    #[must_use]
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard, current: RwLock::new(None) }
    }

    #[must_use]
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// The last committed route, if any navigation has completed.
    #[must_use]
    pub fn current(&self) -> Option<&'static Route> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to the route named `name`, returning the route actually committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the route is unknown or redirects do not settle.
    /// The current route is left unchanged on error.
    pub async fn navigate(&self, name: &str) -> Result<&'static Route, NavigationError> {
        let mut target = name.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            match self.guard.before_each(&target).await {
                GuardDecision::Allow => {
                    let route = find(&target).ok_or_else(|| NavigationError::NotFound(target.clone()))?;
                    *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(route);
                    debug!(route = route.name, path = route.path, "navigation committed");
                    return Ok(route);
                }
                GuardDecision::Redirect { to } => {
                    debug!(from = %target, to, "navigation redirected");
                    to.clone_into(&mut target);
                }
                GuardDecision::Defer => return Err(NavigationError::NotFound(target)),
            }
        }
        Err(NavigationError::RedirectLoop(name.to_owned()))
    }
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;

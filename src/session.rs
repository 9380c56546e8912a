//! Auth-session state for the current client process.
//!
//! SYSTEM CONTEXT
//! ==============
//! Consulted by the route guard and mutated only by `AuthService`. One
//! `SessionStore` is built at startup and shared by `Arc`; nothing else keeps
//! its own copy of the identity.
//!
//! DESIGN
//! ======
//! Both fields sit behind one `RwLock` and every write replaces a whole value,
//! so readers never observe a half-applied update. Each mutation publishes a
//! `SessionEvent` before returning so UI bindings can react to the derived
//! logged-in flag.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 32;

// =============================================================================
// USER
// =============================================================================

/// Authenticated identity as returned by `/auth/login` and `/auth/user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Server-side creation timestamp, if the server still sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Server-side update timestamp, if the server still sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

// =============================================================================
// SESSION
// =============================================================================

/// Point-in-time copy of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<User>,
    /// True once the first server-side authority check has settled.
    pub initialized: bool,
}

impl Session {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }
}

/// Change notification published by [`SessionStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    IdentityChanged { logged_in: bool },
    InitializedChanged { initialized: bool },
}

// =============================================================================
// STORE
// =============================================================================

/// Process-lifetime holder of the single [`Session`].
pub struct SessionStore {
    state: RwLock<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create an empty, uninitialized session.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { state: RwLock::new(Session::default()), events }
    }

    #[must_use]
    pub fn identity(&self) -> Option<User> {
        self.read().identity.clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Replace the identity wholesale. `None` logs the session out.
    pub fn set_identity(&self, user: Option<User>) {
        let logged_in = user.is_some();
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.identity = user;
        }
        self.publish(SessionEvent::IdentityChanged { logged_in });
    }

    /// Alias of [`SessionStore::set_identity`] kept for callers that name the
    /// operation after the logged-in user.
    pub fn set_logged_in_user(&self, user: Option<User>) {
        self.set_identity(user);
    }

    pub fn set_initialized(&self, initialized: bool) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.initialized = initialized;
        }
        self.publish(SessionEvent::InitializedChanged { initialized });
    }

    /// Subscribe to session changes. Only events published after this call are received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is the normal headless case.
        if self.events.send(event).is_err() {
            tracing::trace!("session event dropped: no subscribers");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

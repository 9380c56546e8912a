//! Auth service: login, registration, and session probing.
//!
//! DESIGN
//! ======
//! Translates auth intents into [`AuthApi`] calls and reconciles the results
//! into the shared [`SessionStore`]. Session writes happen only after the call
//! settles. Failures never cross this boundary: they are captured into
//! [`RequestStatus::error`] and reported as a `false` return.
//!
//! Identity policy on failure: a failed `login` or `check_auth` clears the
//! identity, a failed `register` leaves it alone, and `logout` clears it even
//! when the server call fails.
//!
//! TRADE-OFFS
//! ==========
//! `check_auth` serializes the first probe behind an async gate. Callers that
//! arrive while it is in flight wait for it and then take the cached fast
//! path, so the first navigation pays one round trip and later ones are free.
//! Other operations are not deduplicated; overlapping calls race on the
//! status fields and the last writer wins.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi, Credentials, LoginReply, Registration};
use crate::session::SessionStore;

const STATUS_CHANNEL_CAPACITY: usize = 32;

// =============================================================================
// STATUS
// =============================================================================

/// UI-facing side channel. Not part of the functional contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestStatus {
    /// True while a call issued by this service is in flight.
    pub loading: bool,
    /// Last captured failure message. Cleared when a new call starts.
    pub error: Option<String>,
}

impl RequestStatus {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: Arc<SessionStore>,
    status: RwLock<RequestStatus>,
    status_events: broadcast::Sender<RequestStatus>,
    probe_gate: Mutex<()>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<SessionStore>) -> Self {
        let (status_events, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);
        Self { api, session, status: RwLock::new(RequestStatus::default()), status_events, probe_gate: Mutex::new(()) }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Subscribe to loading/error changes.
    #[must_use]
    pub fn subscribe_status(&self) -> broadcast::Receiver<RequestStatus> {
        self.status_events.subscribe()
    }

    /// Submit credentials. On success the session holds the returned user.
    ///
    /// When the server acknowledges the login without a user record, the
    /// identity is fetched from `/auth/user` before reporting success.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.begin();
        let credentials = Credentials { email, password };
        let outcome = match self.api.login(&credentials).await {
            Ok(LoginReply::User(user)) => Ok(user),
            Ok(LoginReply::Acknowledged) => self.api.current_user().await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(user) => {
                info!(user_id = user.id, "login succeeded");
                self.session.set_identity(Some(user));
                self.finish(None);
                true
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.session.set_identity(None);
                self.finish(Some(&err));
                false
            }
        }
    }

    /// Submit a registration. Never touches the session; the user still has to log in.
    pub async fn register(&self, name: &str, email: &str, password: &str, password_confirmation: &str) -> bool {
        self.begin();
        let registration = Registration { name, email, password, password_confirmation };
        match self.api.register(&registration).await {
            Ok(()) => {
                info!("registration succeeded");
                self.finish(None);
                true
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                self.finish(Some(&err));
                false
            }
        }
    }

    /// Resolve whether the session is authenticated.
    ///
    /// Once the session is initialized this answers from the store without a
    /// network call. Otherwise it probes `/auth/user`; a failed probe counts
    /// as logged out. Either way the session is marked initialized.
    pub async fn check_auth(&self) -> bool {
        if self.session.is_initialized() {
            return self.session.is_logged_in();
        }

        let _gate = self.probe_gate.lock().await;
        if self.session.is_initialized() {
            debug!("session probe settled while waiting");
            return self.session.is_logged_in();
        }

        self.begin();
        match self.api.current_user().await {
            Ok(user) => {
                info!(user_id = user.id, "session probe authenticated");
                self.session.set_identity(Some(user));
                self.session.set_initialized(true);
                self.finish(None);
            }
            Err(err) => {
                debug!(error = %err, "session probe unauthenticated");
                self.session.set_identity(None);
                self.session.set_initialized(true);
                self.finish(Some(&err));
            }
        }
        self.session.is_logged_in()
    }

    /// End the server session. The local identity is cleared regardless of
    /// the outcome; the return value reports whether the server acknowledged.
    pub async fn logout(&self) -> bool {
        self.begin();
        let result = self.api.logout().await;
        self.session.set_identity(None);
        match result {
            Ok(()) => {
                info!("logout succeeded");
                self.finish(None);
                true
            }
            Err(err) => {
                warn!(error = %err, "logout failed");
                self.finish(Some(&err));
                false
            }
        }
    }

    fn begin(&self) {
        self.set_status(RequestStatus { loading: true, error: None });
    }

    fn finish(&self, error: Option<&ApiError>) {
        let error = error.map(|e| e.user_message().to_owned());
        self.set_status(RequestStatus { loading: false, error });
    }

    fn set_status(&self, next: RequestStatus) {
        {
            let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
            *status = next.clone();
        }
        if self.status_events.send(next).is_err() {
            tracing::trace!("status event dropped: no subscribers");
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! Shared fixtures for unit tests: users, a scripted [`AuthApi`], and wiring.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::api::{ApiError, AuthApi, Credentials, LoginReply, Registration};
use crate::routes::guard::RouteGuard;
use crate::services::auth::AuthService;
use crate::session::{SessionStore, User};

#[must_use]
pub fn user(id: i64, name: &str, email: &str) -> User {
    User { id, name: name.to_owned(), email: email.to_owned(), created_at: None, updated_at: None }
}

#[must_use]
pub fn structured(status: u16, message: &str) -> ApiError {
    ApiError::Structured { status, message: message.to_owned() }
}

#[must_use]
pub fn unstructured() -> ApiError {
    ApiError::Unstructured("status 500: unrecognized error body".to_owned())
}

// =============================================================================
// MockAuthApi
// =============================================================================

/// Scripted [`AuthApi`]. Each endpoint pops its next queued result; an empty
/// queue answers with an unstructured failure. Every call is counted.
#[derive(Default)]
pub struct MockAuthApi {
    login: Mutex<VecDeque<Result<LoginReply, ApiError>>>,
    register: Mutex<VecDeque<Result<(), ApiError>>>,
    current_user: Mutex<VecDeque<Result<User, ApiError>>>,
    logout: Mutex<VecDeque<Result<(), ApiError>>>,
    delay: Option<Duration>,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub current_user_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub last_registration: Mutex<Option<serde_json::Value>>,
}

fn push<T>(queue: &Mutex<VecDeque<T>>, item: T) {
    queue.lock().unwrap_or_else(PoisonError::into_inner).push_back(item);
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Unstructured("no scripted response".to_owned())))
}

impl MockAuthApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend every call for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn with_login(self, result: Result<LoginReply, ApiError>) -> Self {
        push(&self.login, result);
        self
    }

    #[must_use]
    pub fn with_register(self, result: Result<(), ApiError>) -> Self {
        push(&self.register, result);
        self
    }

    #[must_use]
    pub fn with_current_user(self, result: Result<User, ApiError>) -> Self {
        push(&self.current_user, result);
        self
    }

    #[must_use]
    pub fn with_logout(self, result: Result<(), ApiError>) -> Self {
        push(&self.logout, result);
        self
    }

    pub fn current_user_count(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _credentials: &Credentials<'_>) -> Result<LoginReply, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        pop(&self.login)
    }

    async fn register(&self, registration: &Registration<'_>) -> Result<(), ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_registration.lock().unwrap_or_else(PoisonError::into_inner) =
            serde_json::to_value(registration).ok();
        self.pause().await;
        pop(&self.register)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        pop(&self.current_user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        pop(&self.logout)
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// Build a fresh session + service around `api`.
#[must_use]
pub fn service_with(api: Arc<MockAuthApi>) -> Arc<AuthService> {
    Arc::new(AuthService::new(api, Arc::new(SessionStore::new())))
}

/// Build a guard over a fresh session + service around `api`.
#[must_use]
pub fn guard_with(api: Arc<MockAuthApi>) -> RouteGuard {
    RouteGuard::new(service_with(api))
}

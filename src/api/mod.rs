//! Auth API boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` talks to the server only through the [`AuthApi`] trait.
//! `http` is the production implementation; tests substitute counting mocks.

pub mod http;
pub mod types;

pub use http::HttpAuthApi;
pub use types::{ApiError, Credentials, INTERNAL_SERVER_ERROR, LoginReply, Registration};

use crate::session::User;

// =============================================================================
// AUTH API TRAIT
// =============================================================================

/// Async auth endpoints. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn login(&self, credentials: &Credentials<'_>) -> Result<LoginReply, ApiError>;

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn register(&self, registration: &Registration<'_>) -> Result<(), ApiError>;

    /// `GET /auth/user`: who the current session belongs to.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the session is not authenticated.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// `POST /auth/logout`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects it.
    async fn logout(&self) -> Result<(), ApiError>;
}

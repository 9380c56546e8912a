//! `reqwest`-backed [`AuthApi`].
//!
//! Thin HTTP wrapper for the `/auth/*` endpoints. The client keeps a cookie
//! jar so the session cookie set by `/auth/login` is replayed on later calls.
//! Response interpretation lives in `types` for testability.

use tracing::debug;

use super::AuthApi;
use super::types::{self, ApiError, Credentials, LoginReply, Registration};
use crate::config::AuthConfig;
use crate::session::User;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CURRENT_USER_PATH: &str = "/auth/user";
pub const LOGOUT_PATH: &str = "/auth/logout";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AuthConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Unstructured(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a prepared request and return `(status, body)`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials<'_>) -> Result<LoginReply, ApiError> {
        let url = endpoint(&self.base_url, LOGIN_PATH);
        debug!(%url, email = credentials.email, "auth login request");
        let (status, body) = self.send(self.http.post(url).json(credentials)).await?;
        types::parse_login(status, &body)
    }

    async fn register(&self, registration: &Registration<'_>) -> Result<(), ApiError> {
        let url = endpoint(&self.base_url, REGISTER_PATH);
        debug!(%url, email = registration.email, "auth register request");
        let (status, body) = self.send(self.http.post(url).json(registration)).await?;
        types::parse_ack(status, &body)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let url = endpoint(&self.base_url, CURRENT_USER_PATH);
        debug!(%url, "auth session probe");
        let (status, body) = self.send(self.http.get(url)).await?;
        types::parse_user(status, &body)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = endpoint(&self.base_url, LOGOUT_PATH);
        debug!(%url, "auth logout request");
        let (status, body) = self.send(self.http.post(url)).await?;
        types::parse_ack(status, &body)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

//! Wire types and envelope parsing for the auth endpoints.
//!
//! DESIGN
//! ======
//! The server wraps every response: `{success, data}` on success and
//! `{success: false, error: {code, message}}` on failure. Parsing is pure so
//! it can be tested without a network; `HttpAuthApi` only moves bytes.
//!
//! ERROR HANDLING
//! ==============
//! A failure is structured only when the body carries a non-empty
//! `error.message`. Everything else (transport errors, timeouts, HTML error
//! pages, bodies of the wrong shape) is unstructured and surfaces to users as
//! [`INTERNAL_SERVER_ERROR`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::session::User;

/// User-facing message for failures without a server-provided message.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a parseable error envelope.
    #[error("{message} (status {status})")]
    Structured { status: u16, message: String },

    /// Network failure, timeout, or a response that could not be interpreted.
    #[error("unstructured failure: {0}")]
    Unstructured(String),
}

impl ApiError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Structured { message, .. } => message,
            Self::Unstructured(_) => INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unstructured(err.to_string())
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /auth/login`. Deliberately not `Debug`.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`. Deliberately not `Debug`.
#[derive(Serialize)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// What a successful login answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    /// The envelope carried the user record.
    User(User),
    /// The envelope carried only a message; the identity must be fetched.
    Acknowledged,
}

#[derive(Deserialize)]
struct SuccessEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Classify a non-2xx response.
pub(crate) fn classify_failure(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error: ErrorBody { message: Some(message) } }) if !message.trim().is_empty() => {
            ApiError::Structured { status, message }
        }
        Ok(_) => ApiError::Unstructured(format!("status {status}: error envelope without message")),
        Err(_) => ApiError::Unstructured(format!("status {status}: unrecognized error body")),
    }
}

fn parse_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(classify_failure(status, body));
    }
    serde_json::from_str::<SuccessEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Unstructured(format!("malformed success envelope: {e}")))
}

/// Parse the reply of `GET /auth/user`.
pub(crate) fn parse_user(status: u16, body: &str) -> Result<User, ApiError> {
    parse_data::<User>(status, body)
}

/// Parse the reply of `POST /auth/login`.
pub(crate) fn parse_login(status: u16, body: &str) -> Result<LoginReply, ApiError> {
    let data = parse_data::<serde_json::Value>(status, body)?;
    match data {
        serde_json::Value::Object(_) => serde_json::from_value::<User>(data)
            .map(LoginReply::User)
            .map_err(|e| ApiError::Unstructured(format!("malformed user record: {e}"))),
        _ => Ok(LoginReply::Acknowledged),
    }
}

/// Parse a reply whose payload is not consumed (`register`, `logout`).
pub(crate) fn parse_ack(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(classify_failure(status, body))
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

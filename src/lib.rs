//! Client-side authentication session: store, auth service, and route guard.
//!
//! ARCHITECTURE
//! ============
//! `session` holds the single identity record, `services::auth` reconciles
//! server replies into it through the `api` boundary, and `routes` gates
//! navigation on the result. Everything is wired explicitly; there is no
//! global state.

pub mod api;
pub mod config;
pub mod routes;
pub mod services;
pub mod session;

#[cfg(test)]
pub mod test_helpers;

pub use api::{ApiError, AuthApi, HttpAuthApi};
pub use config::AuthConfig;
pub use routes::{GuardDecision, Navigator, RouteGuard};
pub use services::auth::{AuthService, RequestStatus};
pub use session::{Session, SessionEvent, SessionStore, User};

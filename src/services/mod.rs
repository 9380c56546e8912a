//! Domain services used by route guards and the command-line driver.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the auth business logic so guards and front ends stay
//! focused on navigation and presentation.

pub mod auth;

//! HTTP middleware for request processing and protection.
//!
//! Provides authentication and observability middleware.

pub mod auth;
pub mod tracing;

pub use auth::{AuthUser, BearerToken};

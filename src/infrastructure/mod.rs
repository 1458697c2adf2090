//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and credentials.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis, in-memory and no-op implementations)
//! - [`memory`] - In-process repositories
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`security`] - Access tokens, password hashing, refresh token digests

pub mod cache;
pub mod memory;
pub mod persistence;
pub mod security;

//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and expose the operations
//! HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Short URL lifecycle with read-through caching
//! - [`services::key_generator::KeyGenerator`] - Collision-resolving key allocation
//! - [`services::auth_service::AuthService`] - Accounts, access and refresh tokens

pub mod services;

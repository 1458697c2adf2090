//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgUrlStore`] - Short URL records
//! - [`PgUserRepository`] - Accounts and refresh token digests

pub mod pg_url_store;
pub mod pg_user_repository;

pub use pg_url_store::PgUrlStore;
pub use pg_user_repository::PgUserRepository;

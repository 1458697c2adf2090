//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process fakes). Mock implementations
//! are generated via `mockall` for unit tests.
//!
//! - [`UrlStore`] - Short URL persistence
//! - [`UserRepository`] - Accounts and refresh tokens

pub mod url_store;
pub mod user_repository;

pub use url_store::UrlStore;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use url_store::MockUrlStore;
#[cfg(test)]
pub use user_repository::MockUserRepository;

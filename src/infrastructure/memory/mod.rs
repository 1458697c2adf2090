//! In-process implementations of the repository traits.
//!
//! Used by the integration tests and handy for running the service without
//! PostgreSQL. Both honor the same uniqueness and ownership rules as the
//! PostgreSQL implementations.

mod url_store;
mod user_repository;

pub use url_store::MemoryUrlStore;
pub use user_repository::MemoryUserRepository;

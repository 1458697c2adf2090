//! Repository trait for short URL persistence.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::UrlError;
use async_trait::async_trait;

/// Persistence contract consumed by the short URL core.
///
/// Mutations are scoped to the owning account: a key that exists but
/// belongs to someone else is reported as [`UrlError::NotFound`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryUrlStore`] - In-process fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::DuplicateKey`] if `short_key` is already taken.
    /// Returns [`UrlError::Unexpected`] on any other failure.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, UrlError>;

    /// Looks up a record by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if no record has this key.
    async fn get_by_key(&self, short_key: &str) -> Result<UrlRecord, UrlError>;

    /// Replaces the long URL of an owned record and advances `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if no record matches `owner_id` + `short_key`.
    async fn update(
        &self,
        owner_id: i64,
        short_key: &str,
        new_long_url: &str,
    ) -> Result<UrlRecord, UrlError>;

    /// Removes an owned record.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if no record matches `owner_id` + `short_key`.
    async fn delete(&self, owner_id: i64, short_key: &str) -> Result<(), UrlError>;

    /// Lists the records owned by an account, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlRecord>, UrlError>;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;
}

//! Cache trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    Timeout(Duration),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::Timeout(d) => write!(f, "Cache operation timed out after {:?}", d),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Best-effort key to long URL cache.
///
/// Implementations report failures through [`CacheError`]; deciding that a
/// failure is harmless is the caller's job. The short URL service logs every
/// cache error and falls back to the store, so a broken cache only costs
/// latency.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local bounded TTL cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Retrieves the long URL cached for a short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit (the value is returned as stored, even if empty)
    /// - `Ok(None)` on cache miss
    async fn get(&self, short_key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping, replacing any previous value and resetting its TTL.
    async fn set(&self, short_key: &str, long_url: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes a cached mapping. Removing an absent key succeeds.
    async fn delete(&self, short_key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}

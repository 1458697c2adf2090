//! Process-local cache backed by moka.

use super::service::{CacheResult, UrlCache};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use std::time::{Duration, Instant};

/// Entries kept before the least valuable ones are evicted.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    long_url: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    // Overwrites restart the clock, matching `SET EX` in Redis.
    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache honoring the same TTL semantics as [`super::RedisCache`].
///
/// Bounded by entry count, with expired entries evicted by moka's
/// housekeeping. Suitable for single-instance deployments
/// (`CACHE_IN_MEMORY=true`) and tests.
pub struct MemoryCache {
    cache: MokaCache<String, Entry>,
}

impl MemoryCache {
    /// Creates an empty cache holding up to [`DEFAULT_MAX_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }

    /// Number of live entries after pending evictions have been applied.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MemoryCache {
    async fn get(&self, short_key: &str) -> CacheResult<Option<String>> {
        Ok(self.cache.get(short_key).await.map(|entry| entry.long_url))
    }

    async fn set(&self, short_key: &str, long_url: &str, ttl: Duration) -> CacheResult<()> {
        self.cache
            .insert(
                short_key.to_string(),
                Entry {
                    long_url: long_url.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, short_key: &str) -> CacheResult<()> {
        self.cache.invalidate(short_key).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation for fast URL lookups.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Every command is bounded by `op_timeout` so a slow Redis degrades to a
/// cache error instead of stalling the request.
pub struct RedisCache {
    client: ConnectionManager,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout` - Upper bound for each cache command (`CACHE_TIMEOUT_MS`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            op_timeout,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_key: &str) -> String {
        format!("{}{}", self.key_prefix, short_key)
    }

    async fn bounded<T, F>(&self, op: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::OperationError(e.to_string())),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl UrlCache for RedisCache {
    async fn get(&self, short_key: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        let value = self.bounded(conn.get::<_, Option<String>>(&key)).await?;
        match &value {
            Some(_) => debug!("Cache HIT: {}", short_key),
            None => debug!("Cache MISS: {}", short_key),
        }
        Ok(value)
    }

    async fn set(&self, short_key: &str, long_url: &str, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        self.bounded(conn.set_ex::<_, _, ()>(&key, long_url, ttl_seconds))
            .await?;
        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            short_key, long_url, ttl_seconds
        );
        Ok(())
    }

    async fn delete(&self, short_key: &str) -> CacheResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        let deleted = self.bounded(conn.del::<_, i32>(&key)).await?;
        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", short_key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}

//! Short URL lifecycle: create, resolve, update, delete.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::KeyGenerator;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::UrlError;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::cache::UrlCache;
use crate::utils::key_generator::is_valid_key;
use crate::utils::long_url::validate_long_url;
use tracing::{debug, error, warn};

/// Coordinates the key generator, the store and the cache.
///
/// Reads go cache first and repopulate it on a miss. Writes go to the store
/// first and then overwrite or invalidate the cache entry. Cache failures are
/// logged and never fail an operation; the store is the source of truth.
pub struct ShortUrlService<S: UrlStore + ?Sized> {
    store: Arc<S>,
    cache: Arc<dyn UrlCache>,
    keys: KeyGenerator<S>,
    cache_ttl: Duration,
    max_create_attempts: u32,
}

impl<S: UrlStore + ?Sized> ShortUrlService<S> {
    /// Creates a new short URL service.
    ///
    /// # Arguments
    ///
    /// - `store` - persistent mapping store
    /// - `cache` - best-effort lookup cache
    /// - `cache_ttl` - lifetime of entries written by this service
    /// - `max_key_probes` - probe bound per key resolution
    /// - `max_create_attempts` - insert attempts before a duplicate key is surfaced
    pub fn new(
        store: Arc<S>,
        cache: Arc<dyn UrlCache>,
        cache_ttl: Duration,
        max_key_probes: u32,
        max_create_attempts: u32,
    ) -> Self {
        Self {
            keys: KeyGenerator::new(store.clone(), max_key_probes),
            store,
            cache,
            cache_ttl,
            max_create_attempts: max_create_attempts.max(2),
        }
    }

    /// Shortens `long_url` on behalf of `owner_id`.
    ///
    /// Creating the same URL twice yields two records with different keys,
    /// because the first key is already taken when the second resolution runs.
    ///
    /// # Errors
    ///
    /// - [`UrlError::Validation`] if the URL is empty, relative or not http(s)
    /// - [`UrlError::KeySpaceExhausted`] if every probed candidate is taken
    /// - [`UrlError::DuplicateKey`] if every insert attempt lost a race
    pub async fn create_short_url(
        &self,
        owner_id: i64,
        long_url: &str,
    ) -> Result<UrlRecord, UrlError> {
        let long_url = validate_long_url(long_url)
            .map_err(|e| UrlError::Validation(e.to_string()))?
            .to_string();

        let mut next_probe = 0;

        for attempt in 1..=self.max_create_attempts {
            let (short_key, probe) = self.keys.resolve_unique_key(&long_url, next_probe).await?;

            let new_record = NewUrlRecord {
                owner_id,
                short_key,
                long_url: long_url.clone(),
            };

            match self.store.create(new_record).await {
                Ok(record) => {
                    debug!(key = %record.short_key, owner_id, "Short URL created");
                    return Ok(record);
                }
                Err(UrlError::DuplicateKey) => {
                    warn!(
                        probe,
                        attempt, "Short key claimed concurrently, retrying from next probe"
                    );
                    metrics::counter!("url_create_retries_total").increment(1);
                    next_probe = probe.saturating_add(1);
                }
                Err(e) => {
                    error!(error = %e, "Failed to persist short URL");
                    return Err(e);
                }
            }
        }

        error!(
            attempts = self.max_create_attempts,
            "Giving up on short URL creation after repeated key conflicts"
        );
        Err(UrlError::DuplicateKey)
    }

    /// Resolves a short key to its long URL.
    ///
    /// # Errors
    ///
    /// - [`UrlError::Validation`] if `short_key` is empty
    /// - [`UrlError::NotFound`] if no record exists for the key
    /// - [`UrlError::Unexpected`] if the store fails
    pub async fn get_long_url(&self, short_key: &str) -> Result<String, UrlError> {
        if short_key.is_empty() {
            return Err(UrlError::Validation("short key is empty".to_string()));
        }
        if !is_valid_key(short_key) {
            return Err(UrlError::NotFound);
        }

        match self.cache.get(short_key).await {
            Ok(Some(long_url)) if validate_long_url(&long_url).is_ok() => {
                metrics::counter!("url_cache_hits_total").increment(1);
                return Ok(long_url);
            }
            Ok(Some(_)) => {
                warn!(key = %short_key, "Discarding malformed cache entry");
                metrics::counter!("url_cache_misses_total").increment(1);
            }
            Ok(None) => {
                metrics::counter!("url_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!(key = %short_key, error = %e, "Cache read failed, falling back to store");
                metrics::counter!("url_cache_errors_total").increment(1);
            }
        }

        let record = self.store.get_by_key(short_key).await.map_err(|e| {
            if !matches!(e, UrlError::NotFound) {
                error!(key = %short_key, error = %e, "Store lookup failed");
            }
            e
        })?;

        self.cache_put(short_key, &record.long_url).await;

        Ok(record.long_url)
    }

    /// Points an owned short key at a new long URL.
    ///
    /// The cache entry is overwritten right after the store write, so the
    /// next lookup returns the new target.
    ///
    /// # Errors
    ///
    /// - [`UrlError::Validation`] if the new URL is invalid
    /// - [`UrlError::NotFound`] if `owner_id` has no record with this key
    pub async fn update_short_url(
        &self,
        owner_id: i64,
        short_key: &str,
        new_long_url: &str,
    ) -> Result<UrlRecord, UrlError> {
        let new_long_url =
            validate_long_url(new_long_url).map_err(|e| UrlError::Validation(e.to_string()))?;

        let record = self
            .store
            .update(owner_id, short_key, new_long_url)
            .await?;

        self.cache_put(&record.short_key, &record.long_url).await;

        Ok(record)
    }

    /// Deletes an owned short key and drops its cache entry.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::NotFound`] if `owner_id` has no record with this key.
    pub async fn delete_short_url(&self, owner_id: i64, short_key: &str) -> Result<(), UrlError> {
        self.store.delete(owner_id, short_key).await?;

        if let Err(e) = self.cache.delete(short_key).await {
            warn!(key = %short_key, error = %e, "Cache invalidation failed");
            metrics::counter!("url_cache_errors_total").increment(1);
        }

        Ok(())
    }

    /// Lists the records owned by `owner_id`, newest first.
    pub async fn list_short_urls(&self, owner_id: i64) -> Result<Vec<UrlRecord>, UrlError> {
        self.store.list_by_owner(owner_id).await
    }

    /// Reports whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }

    async fn cache_put(&self, short_key: &str, long_url: &str) {
        if let Err(e) = self.cache.set(short_key, long_url, self.cache_ttl).await {
            warn!(key = %short_key, error = %e, "Cache write failed");
            metrics::counter!("url_cache_errors_total").increment(1);
        }
    }
}

//! Collision-resolving short key allocation.

use std::sync::Arc;

use crate::domain::errors::UrlError;
use crate::domain::repositories::UrlStore;
use crate::utils::key_generator::generate_key;
use tracing::debug;

/// Walks the deterministic probe sequence of a long URL until it finds a key
/// the store does not know yet.
///
/// The returned key was free when checked. Two concurrent creators can still
/// pick the same one, and the store's unique constraint decides who wins.
pub struct KeyGenerator<S: UrlStore + ?Sized> {
    store: Arc<S>,
    max_probes: u32,
}

impl<S: UrlStore + ?Sized> KeyGenerator<S> {
    /// Creates a generator bounded to `max_probes` candidates per call.
    pub fn new(store: Arc<S>, max_probes: u32) -> Self {
        Self {
            store,
            max_probes: max_probes.max(1),
        }
    }

    pub fn max_probes(&self) -> u32 {
        self.max_probes
    }

    /// Finds the first free key for `long_url`, starting at `start_probe`.
    ///
    /// Returns the key together with the probe that produced it, so a caller
    /// that loses an insert race can resume from `probe + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::KeySpaceExhausted`] after `max_probes` occupied candidates.
    /// Store failures other than `NotFound` are propagated unchanged.
    pub async fn resolve_unique_key(
        &self,
        long_url: &str,
        start_probe: u32,
    ) -> Result<(String, u32), UrlError> {
        let end = start_probe.saturating_add(self.max_probes);

        for probe in start_probe..end {
            let key = generate_key(long_url, probe);

            match self.store.get_by_key(&key).await {
                Err(UrlError::NotFound) => return Ok((key, probe)),
                Ok(_) => {
                    debug!(key = %key, probe, "Short key taken, probing next");
                    metrics::counter!("url_key_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(UrlError::KeySpaceExhausted {
            probes: self.max_probes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockUrlStore;
    use chrono::Utc;

    const URL: &str = "https://www.example.com/shop";

    fn record(key: &str) -> UrlRecord {
        UrlRecord::new(
            1,
            key.to_string(),
            "https://other.example.com".to_string(),
            1,
            Utc::now(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_first_candidate_free() {
        let mut mock_store = MockUrlStore::new();
        mock_store
            .expect_get_by_key()
            .withf(|key| key == "3174bab")
            .times(1)
            .returning(|_| Err(UrlError::NotFound));

        let generator = KeyGenerator::new(Arc::new(mock_store), 64);

        let (key, probe) = generator.resolve_unique_key(URL, 0).await.unwrap();

        assert_eq!(key, "3174bab");
        assert_eq!(probe, 0);
    }

    #[tokio::test]
    async fn test_collision_moves_to_next_probe() {
        let mut mock_store = MockUrlStore::new();
        mock_store
            .expect_get_by_key()
            .withf(|key| key == "3174bab")
            .times(1)
            .returning(|key| Ok(record(key)));
        mock_store
            .expect_get_by_key()
            .withf(|key| key == "a747569")
            .times(1)
            .returning(|_| Err(UrlError::NotFound));

        let generator = KeyGenerator::new(Arc::new(mock_store), 64);

        let (key, probe) = generator.resolve_unique_key(URL, 0).await.unwrap();

        assert_eq!(key, "a747569");
        assert_eq!(probe, 1);
    }

    #[tokio::test]
    async fn test_resume_from_later_probe() {
        let mut mock_store = MockUrlStore::new();
        mock_store
            .expect_get_by_key()
            .withf(|key| key == "a747569")
            .times(1)
            .returning(|_| Err(UrlError::NotFound));

        let generator = KeyGenerator::new(Arc::new(mock_store), 64);

        let (key, probe) = generator.resolve_unique_key(URL, 1).await.unwrap();

        assert_eq!(key, "a747569");
        assert_eq!(probe, 1);
    }

    #[tokio::test]
    async fn test_exhaustion_is_bounded() {
        let mut mock_store = MockUrlStore::new();
        mock_store
            .expect_get_by_key()
            .times(4)
            .returning(|key| Ok(record(key)));

        let generator = KeyGenerator::new(Arc::new(mock_store), 4);

        let result = generator.resolve_unique_key(URL, 0).await;

        assert_eq!(result, Err(UrlError::KeySpaceExhausted { probes: 4 }));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut mock_store = MockUrlStore::new();
        mock_store
            .expect_get_by_key()
            .times(1)
            .returning(|_| Err(UrlError::Unexpected("connection reset".to_string())));

        let generator = KeyGenerator::new(Arc::new(mock_store), 64);

        let result = generator.resolve_unique_key(URL, 0).await;

        assert!(matches!(result, Err(UrlError::Unexpected(_))));
    }
}

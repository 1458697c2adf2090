use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::UrlError;
use crate::domain::repositories::UrlStore;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_key: HashMap<String, UrlRecord>,
}

/// Map-backed [`UrlStore`].
#[derive(Default)]
pub struct MemoryUrlStore {
    inner: Mutex<Inner>,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, UrlError> {
        let mut inner = self.lock();

        if inner.by_key.contains_key(&new_record.short_key) {
            return Err(UrlError::DuplicateKey);
        }

        inner.next_id += 1;
        let now = Utc::now();
        let record = UrlRecord::new(
            inner.next_id,
            new_record.short_key,
            new_record.long_url,
            new_record.owner_id,
            now,
            now,
        );
        inner
            .by_key
            .insert(record.short_key.clone(), record.clone());

        Ok(record)
    }

    async fn get_by_key(&self, short_key: &str) -> Result<UrlRecord, UrlError> {
        self.lock()
            .by_key
            .get(short_key)
            .cloned()
            .ok_or(UrlError::NotFound)
    }

    async fn update(
        &self,
        owner_id: i64,
        short_key: &str,
        new_long_url: &str,
    ) -> Result<UrlRecord, UrlError> {
        let mut inner = self.lock();

        let record = inner
            .by_key
            .get_mut(short_key)
            .filter(|r| r.is_owned_by(owner_id))
            .ok_or(UrlError::NotFound)?;

        record.long_url = new_long_url.to_string();
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete(&self, owner_id: i64, short_key: &str) -> Result<(), UrlError> {
        let mut inner = self.lock();

        let owned = inner
            .by_key
            .get(short_key)
            .is_some_and(|r| r.is_owned_by(owner_id));
        if !owned {
            return Err(UrlError::NotFound);
        }

        inner.by_key.remove(short_key);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlRecord>, UrlError> {
        let mut records: Vec<UrlRecord> = self
            .lock()
            .by_key
            .values()
            .filter(|r| r.is_owned_by(owner_id))
            .cloned()
            .collect();

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

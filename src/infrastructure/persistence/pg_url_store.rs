//! PostgreSQL implementation of the short URL store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::UrlError;
use crate::domain::repositories::UrlStore;

const RECORD_COLUMNS: &str = "id, short_key, long_url, owner_id, created_at, updated_at";

/// PostgreSQL store for short URL records.
///
/// The `urls_short_key_key` unique constraint is what finally decides which
/// of two concurrent creators gets a key; its violation surfaces as
/// [`UrlError::DuplicateKey`].
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, UrlError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            r#"
            INSERT INTO urls (short_key, long_url, owner_id)
            VALUES ($1, $2, $3)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(&new_record.short_key)
        .bind(&new_record.long_url)
        .bind(new_record.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn get_by_key(&self, short_key: &str) -> Result<UrlRecord, UrlError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM urls WHERE short_key = $1"
        ))
        .bind(short_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        record.ok_or(UrlError::NotFound)
    }

    async fn update(
        &self,
        owner_id: i64,
        short_key: &str,
        new_long_url: &str,
    ) -> Result<UrlRecord, UrlError> {
        let record = sqlx::query_as::<_, UrlRecord>(&format!(
            r#"
            UPDATE urls
            SET long_url = $3, updated_at = NOW()
            WHERE short_key = $1 AND owner_id = $2
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(short_key)
        .bind(owner_id)
        .bind(new_long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        record.ok_or(UrlError::NotFound)
    }

    async fn delete(&self, owner_id: i64, short_key: &str) -> Result<(), UrlError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_key = $1 AND owner_id = $2")
            .bind(short_key)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(UrlError::NotFound);
        }

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlRecord>, UrlError> {
        let records = sqlx::query_as::<_, UrlRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM urls
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}

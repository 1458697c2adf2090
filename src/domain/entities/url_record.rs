//! Short URL record entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted mapping from a short key to a long URL.
///
/// `id` and `short_key` never change after creation. `long_url` and
/// `updated_at` change on every successful update by the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub short_key: String,
    pub long_url: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        short_key: String,
        long_url: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_key,
            long_url,
            owner_id,
            created_at,
            updated_at,
        }
    }

    /// Returns true if `user_id` may update or delete this record.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub owner_id: i64,
    pub short_key: String,
    pub long_url: String,
}

//! DTOs for short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Body of `POST /api/v1/urls` and `PUT /api/v1/urls/{key}`.
///
/// Only the size is checked here; scheme and host rules live in the service.
#[derive(Debug, Deserialize, Validate)]
pub struct LongUrlRequest {
    #[validate(length(min = 1, max = 8192, message = "long_url must be 1-8192 characters"))]
    pub long_url: String,
}

/// A short URL as returned to its owner.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub key: String,
    /// Path that redirects to `long_url`.
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for ShortUrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_url: format!("/api/v1/urls/{}", record.short_key),
            key: record.short_key,
            long_url: record.long_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortUrlListResponse {
    pub total: usize,
    pub items: Vec<ShortUrlResponse>,
}

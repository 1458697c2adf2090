//! Handlers for owner-scoped short URL management.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::short_url::{LongUrlRequest, ShortUrlListResponse, ShortUrlResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a long URL for the authenticated account.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://www.example.com/shop" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "key": "3174bab",
///   "short_url": "/api/v1/urls/3174bab",
///   "long_url": "https://www.example.com/shop",
///   "created_at": "2026-01-01T00:00:00Z",
///   "updated_at": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400` if `long_url` is empty, relative or not http(s)
/// - `409` if every insert attempt lost a key race
/// - `500` if the probe sequence is exhausted
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LongUrlRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    payload.validate()?;

    let record = state
        .short_url_service
        .create_short_url(user.id, &payload.long_url)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Lists the authenticated account's short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/urls`
pub async fn list_short_urls_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ShortUrlListResponse>, AppError> {
    let items: Vec<ShortUrlResponse> = state
        .short_url_service
        .list_short_urls(user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ShortUrlListResponse {
        total: items.len(),
        items,
    }))
}

/// Points an owned short key at a new long URL.
///
/// # Endpoint
///
/// `PUT /api/v1/urls/{key}`
///
/// The cached mapping is overwritten, so redirects follow the new target
/// immediately.
///
/// # Errors
///
/// - `400` if the new URL is invalid
/// - `404` if the key does not exist or belongs to another account
pub async fn update_short_url_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LongUrlRequest>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    let record = state
        .short_url_service
        .update_short_url(user.id, &key, &payload.long_url)
        .await?;

    Ok(Json(record.into()))
}

/// Deletes an owned short key.
///
/// # Endpoint
///
/// `DELETE /api/v1/urls/{key}`
///
/// # Response
///
/// `204 No Content`. The key stops redirecting right away.
///
/// # Errors
///
/// - `404` if the key does not exist or belongs to another account
pub async fn delete_short_url_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state
        .short_url_service
        .delete_short_url(user.id, &key)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

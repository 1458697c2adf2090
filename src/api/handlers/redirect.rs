//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its long URL.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{key}` (public)
///
/// Resolution is read-through: the cache answers first and a miss is filled
/// from the store. Cache outages only cost latency.
///
/// Responds `307 Temporary Redirect`: targets can be changed by their owner,
/// so clients must not remember the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.short_url_service.get_long_url(&key).await?;

    Ok(Redirect::temporary(&long_url))
}

//! Handlers for account registration and update.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{CredentialsRequest, UserResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "hunter2" }
/// ```
///
/// # Errors
///
/// - `400` if the email is malformed or the password empty
/// - `409` if the email is already registered
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Replaces the authenticated account's email and password.
///
/// # Endpoint
///
/// `PUT /api/v1/users`
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let updated = state
        .auth_service
        .update_user(user.id, &payload.email, &payload.password)
        .await?;

    Ok(Json(updated.into()))
}

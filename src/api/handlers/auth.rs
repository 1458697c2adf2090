//! Handlers for login, token refresh and logout.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{LoginRequest, LoginResponse, TokenResponse};
use crate::api::middleware::{AuthUser, BearerToken};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for an access token and a refresh token.
///
/// # Endpoint
///
/// `POST /api/v1/login`
///
/// # Errors
///
/// - `400` if email or password is missing
/// - `404` if the email is not registered
/// - `401` if the password is wrong
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        id: session.user.id,
        email: session.user.email,
        token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
    }))
}

/// Issues a new access token.
///
/// # Endpoint
///
/// `POST /api/v1/refresh` with `Authorization: Bearer <refresh token>`
///
/// # Errors
///
/// Returns `401` if the refresh token is unknown, revoked or expired.
pub async fn refresh_handler(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> Result<Json<TokenResponse>, AppError> {
    let access = state.auth_service.refresh(&refresh_token).await?;

    Ok(Json(TokenResponse {
        token: access.token,
        expires_in: access.expires_in,
    }))
}

/// Revokes the authenticated account's refresh token.
///
/// # Endpoint
///
/// `POST /api/v1/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(user.id).await?;

    tracing::info!(user_id = user.id, "User logged out");

    Ok(StatusCode::NO_CONTENT)
}

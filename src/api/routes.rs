//! API route configuration.
//!
//! Mutating endpoints require an access token, checked by
//! [`crate::api::middleware::auth`]. Registration, login, refresh, health
//! and redirects are public.

use crate::api::handlers::{
    create_short_url_handler, create_user_handler, delete_short_url_handler, health_handler,
    list_short_urls_handler, login_handler, logout_handler, redirect_handler, refresh_handler,
    update_short_url_handler, update_user_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

/// All `/api/v1` routes.
///
/// # Endpoints
///
/// - `GET    /healthz`      - Health check (public)
/// - `POST   /users`        - Register (public)
/// - `PUT    /users`        - Update own account
/// - `POST   /login`        - Obtain access + refresh token (public)
/// - `POST   /refresh`      - New access token from a refresh token
/// - `POST   /logout`       - Revoke refresh token
/// - `POST   /urls`         - Create a short URL
/// - `GET    /urls`         - List own short URLs
/// - `GET    /urls/{key}`   - Redirect (public)
/// - `PUT    /urls/{key}`   - Retarget a short URL
/// - `DELETE /urls/{key}`   - Delete a short URL
pub fn api_routes(state: AppState) -> Router<AppState> {
    let require_auth = || middleware::from_fn_with_state(state.clone(), auth::layer);

    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/users",
            post(create_user_handler).merge(put(update_user_handler).route_layer(require_auth())),
        )
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler).route_layer(require_auth()))
        .route(
            "/urls",
            post(create_short_url_handler)
                .get(list_short_urls_handler)
                .route_layer(require_auth()),
        )
        .route(
            "/urls/{key}",
            get(redirect_handler).merge(
                put(update_short_url_handler)
                    .delete(delete_short_url_handler)
                    .route_layer(require_auth()),
            ),
        )
}

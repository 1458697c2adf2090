//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod redirect;
pub mod short_urls;
pub mod users;

pub use auth::{login_handler, logout_handler, refresh_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short_urls::{
    create_short_url_handler, delete_short_url_handler, list_short_urls_handler,
    update_short_url_handler,
};
pub use users::{create_user_handler, update_user_handler};

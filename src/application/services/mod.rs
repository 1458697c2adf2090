//! Business logic services for the application layer.

pub mod auth_service;
pub mod key_generator;
pub mod short_url_service;

pub use auth_service::{AccessToken, AuthService, Session};
pub use key_generator::KeyGenerator;
pub use short_url_service::ShortUrlService;

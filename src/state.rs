//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ShortUrlService};
use crate::config::Config;
use crate::domain::repositories::{UrlStore, UserRepository};
use crate::infrastructure::cache::UrlCache;

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService<dyn UrlStore>>,
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub cache: Arc<dyn UrlCache>,
}

impl AppState {
    pub fn new(
        short_url_service: Arc<ShortUrlService<dyn UrlStore>>,
        auth_service: Arc<AuthService<dyn UserRepository>>,
        cache: Arc<dyn UrlCache>,
    ) -> Self {
        Self {
            short_url_service,
            auth_service,
            cache,
        }
    }

    /// Wires services from their collaborators using the tuning knobs in `config`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn UrlStore>,
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn UrlCache>,
    ) -> Self {
        let short_url_service = Arc::new(ShortUrlService::new(
            store,
            cache.clone(),
            config.cache_ttl(),
            config.max_key_probes,
            config.max_create_attempts,
        ));

        let auth_service = Arc::new(AuthService::new(
            users,
            &config.jwt_secret,
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        ));

        Self::new(short_url_service, auth_service, cache)
    }
}

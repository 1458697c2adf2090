#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url_short::application::services::{AuthService, ShortUrlService};
use url_short::domain::repositories::{UrlStore, UserRepository};
use url_short::infrastructure::cache::{MemoryCache, UrlCache};
use url_short::infrastructure::memory::{MemoryUrlStore, MemoryUserRepository};
use url_short::routes::build_router;
use url_short::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const PASSWORD: &str = "correct horse battery staple";

/// Handles to the in-memory backends behind a test server.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryUrlStore>,
    pub cache: Arc<MemoryCache>,
}

pub fn create_test_state(store: Arc<MemoryUrlStore>, cache: Arc<MemoryCache>) -> AppState {
    let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
    let url_store: Arc<dyn UrlStore> = store;
    let url_cache: Arc<dyn UrlCache> = cache;

    let short_url_service = Arc::new(ShortUrlService::new(
        url_store,
        url_cache.clone(),
        Duration::from_secs(60),
        64,
        2,
    ));
    let auth_service = Arc::new(AuthService::new(
        users,
        TEST_SECRET,
        Duration::from_secs(900),
        Duration::from_secs(86_400),
    ));

    AppState::new(short_url_service, auth_service, url_cache)
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUrlStore::new());
    let cache = Arc::new(MemoryCache::new());
    let state = create_test_state(store.clone(), cache.clone());

    let app = build_router(state, Duration::from_secs(5));
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        store,
        cache,
    }
}

pub async fn register(server: &TestServer, email: &str) -> serde_json::Value {
    let response = server
        .post("/api/v1/users")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()
}

pub async fn login(server: &TestServer, email: &str) -> serde_json::Value {
    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()
}

/// Registers `email` and returns a fresh access token for it.
pub async fn access_token(server: &TestServer, email: &str) -> String {
    register(server, email).await;
    login(server, email).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

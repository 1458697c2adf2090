mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_account() {
    let app = common::spawn_app();

    let json = common::register(&app.server, "alice@example.com").await;

    assert!(json["id"].is_number());
    assert_eq!(json["email"], "alice@example.com");
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;

    let response = app
        .server
        .post("/api/v1/users")
        .json(&json!({ "email": "alice@example.com", "password": "another" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/users")
        .json(&json!({ "email": "not-an-email", "password": "secret" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_login_returns_tokens() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;

    let json = common::login(&app.server, "alice@example.com").await;

    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["refresh_token"].as_str().unwrap().len(), 64);
    assert_eq!(json["expires_in"], 900);
}

#[tokio::test]
async fn test_login_failures() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;

    app.server
        .post("/api/v1/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api/v1/login")
        .json(&json!({ "email": "nobody@example.com", "password": "whatever" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .post("/api/v1/login")
        .json(&json!({ "email": "", "password": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_issues_working_access_token() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;
    let session = common::login(&app.server, "alice@example.com").await;

    let response = app
        .server
        .post("/api/v1/refresh")
        .authorization_bearer(session["refresh_token"].as_str().unwrap())
        .await;

    response.assert_status_ok();
    let token = response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    app.server
        .get("/api/v1/urls")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = common::spawn_app();
    let token = common::access_token(&app.server, "alice@example.com").await;

    app.server
        .post("/api/v1/refresh")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;
    let session = common::login(&app.server, "alice@example.com").await;
    let access = session["token"].as_str().unwrap();
    let refresh = session["refresh_token"].as_str().unwrap();

    app.server
        .post("/api/v1/logout")
        .authorization_bearer(access)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .post("/api/v1/refresh")
        .authorization_bearer(refresh)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_second_login_replaces_refresh_token() {
    let app = common::spawn_app();
    common::register(&app.server, "alice@example.com").await;
    let first = common::login(&app.server, "alice@example.com").await;
    let second = common::login(&app.server, "alice@example.com").await;

    app.server
        .post("/api/v1/refresh")
        .authorization_bearer(first["refresh_token"].as_str().unwrap())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api/v1/refresh")
        .authorization_bearer(second["refresh_token"].as_str().unwrap())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_user_changes_credentials() {
    let app = common::spawn_app();
    let token = common::access_token(&app.server, "alice@example.com").await;

    let response = app
        .server
        .put("/api/v1/users")
        .authorization_bearer(&token)
        .json(&json!({ "email": "alice@example.org", "password": "new-password" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["email"],
        "alice@example.org"
    );

    app.server
        .post("/api/v1/login")
        .json(&json!({ "email": "alice@example.org", "password": "new-password" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_user_requires_token() {
    let app = common::spawn_app();

    app.server
        .put("/api/v1/users")
        .json(&json!({ "email": "alice@example.org", "password": "new-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

//! Authentication API integration tests
//!
//! Tests for registration, login, logout, the current-user endpoint and the
//! authentication gate in front of them.

use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use workboard::backend::auth::sessions::session_key;
use workboard::backend::auth::{SessionManager, SessionStore};
use workboard::shared::AppConfig;

use crate::common::*;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = register_user(&app, "  Ann ", "Ann@Example.com").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["id"].as_i64().unwrap() >= 1);
    assert_eq!(response.body["name"], "Ann");
    assert_eq!(response.body["email"], "ann@example.com");
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    register_user(&app, "Ann", "ann@example.com").await;

    let response = register_user(&app, "Other Ann", "ANN@example.com").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), "email is already taken");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::new();
    let cases = [
        (json!({}), "name is a required field"),
        (
            json!({"name": "Ann", "email": "nope", "password": "longenough", "password_confirmation": "longenough"}),
            "email must be a valid email",
        ),
        (
            json!({"name": "Ann", "email": "ann@example.com", "password": "short", "password_confirmation": "short"}),
            "password must be at least 8 characters long",
        ),
        (
            json!({"name": "Ann", "email": "ann@example.com", "password": "longenough", "password_confirmation": "different"}),
            "password and password_confirmation do not match",
        ),
    ];

    for (body, message) in cases {
        let response = app.post("/auth/register", None, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), message);
        assert_eq!(response.body["status"], 400);
    }
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid request");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    register_user(&app, "Ann", "ann@example.com").await;

    let response = login_user(&app, "ANN@example.com", TEST_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"message": "logged in successfully"}));

    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with("auth_session="));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
    assert_eq!(app.sessions.len(), 1);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new();
    register_user(&app, "Ann", "ann@example.com").await;

    let wrong_password = login_user(&app, "ann@example.com", "not-the-password").await;
    let unknown_email = login_user(&app, "bob@example.com", TEST_PASSWORD).await;

    for response in [wrong_password, unknown_email] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error(), "username or password is invalid");
        assert!(response.set_cookies().is_empty());
    }
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_login_secure_cookie_behind_tls_proxy() {
    let app = TestApp::new();
    register_user(&app, "Ann", "ann@example.com").await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-proto", "https")
        .body(axum::body::Body::from(
            json!({"email": "ann@example.com", "password": TEST_PASSWORD}).to_string(),
        ))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookies()[0].ends_with("; Secure"));
}

#[tokio::test]
async fn test_login_secure_cookie_when_forced() {
    let config = AppConfig::builder().cookie_secure(true).build().unwrap();
    let app = TestApp::with_config(config);
    register_user(&app, "Ann", "ann@example.com").await;

    let response = login_user(&app, "ann@example.com", TEST_PASSWORD).await;

    assert!(response.set_cookies()[0].contains("Secure"));
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new();
    let (id, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    let response = app.get("/auth/user", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["name"], "Ann");
    assert_eq!(response.body["email"], "ann@example.com");
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body["created_at"].is_string());
}

#[tokio::test]
async fn test_missing_cookie_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.get("/auth/user", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({"error": "unauthenticated", "status": 401}));
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_unknown_session_clears_cookie() {
    let app = TestApp::new();

    let response = app.get("/auth/user", Some("auth_session=forged")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "unauthenticated");
    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("auth_session=;"));
    assert!(cookies[0].contains("Max-Age=-1"));
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let mut app = TestApp::new();
    app.state = app
        .state
        .clone()
        .with_sessions(SessionManager::with_ttl(app.sessions.clone(), Duration::from_millis(5)));
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    tokio::time::sleep(Duration::from_millis(30)).await;
    let response = app.get("/auth/user", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookies()[0].contains("Max-Age=-1"));
}

#[tokio::test]
async fn test_corrupt_session_is_revoked() {
    let app = TestApp::new();
    app.sessions
        .set(&session_key("garbled"), "not-a-number", Duration::from_secs(60))
        .await
        .unwrap();

    let response = app.get("/auth/user", Some("auth_session=garbled")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookies()[0].contains("Max-Age=-1"));
    assert_eq!(app.sessions.get(&session_key("garbled")).await.unwrap(), None);
}

#[tokio::test]
async fn test_session_for_missing_user_is_revoked() {
    let app = TestApp::new();
    app.sessions
        .set(&session_key("orphan"), "42", Duration::from_secs(60))
        .await
        .unwrap();

    let response = app.get("/auth/user", Some("auth_session=orphan")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.sessions.get(&session_key("orphan")).await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let app = TestApp::new();
    let (_, cookie) = signed_in_user(&app, "Ann", "ann@example.com").await;

    let response = app.post("/auth/logout", Some(&cookie), json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"message": "logged out successfully"}));
    assert!(response.set_cookies()[0].contains("Max-Age=-1"));
    assert!(app.sessions.is_empty());

    let after = app.get("/auth/user", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_session() {
    let app = TestApp::new();

    let response = app.post("/auth/logout", None, json!({})).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::new();
    let (_, first) = signed_in_user(&app, "Ann", "ann@example.com").await;
    let second = session_cookie(&login_user(&app, "ann@example.com", TEST_PASSWORD).await).unwrap();
    assert_ne!(first, second);

    app.post("/auth/logout", Some(&first), json!({})).await;

    assert_eq!(app.get("/auth/user", Some(&first)).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/auth/user", Some(&second)).await.status, StatusCode::OK);
}

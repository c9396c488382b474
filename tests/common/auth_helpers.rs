//! Authentication test helpers
//!
//! Register and log in users through the HTTP API and pull the session
//! cookie out of the response.

use serde_json::json;

use super::app::{TestApp, TestResponse};

/// Default password used by the helpers
pub const TEST_PASSWORD: &str = "correct-horse";

/// Register a user and return the response
pub async fn register_user(app: &TestApp, name: &str, email: &str) -> TestResponse {
    app.post(
        "/auth/register",
        None,
        json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "password_confirmation": TEST_PASSWORD,
        }),
    )
    .await
}

/// Log a user in and return the response
pub async fn login_user(app: &TestApp, email: &str, password: &str) -> TestResponse {
    app.post("/auth/login", None, json!({ "email": email, "password": password }))
        .await
}

/// The `name=value` pair of the first `auth_session` cookie set on a response
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .set_cookies()
        .into_iter()
        .find(|cookie| cookie.starts_with("auth_session="))
        .and_then(|cookie| cookie.split(';').next().map(str::to_string))
}

/// Register and log in, returning the user id and the cookie to send back
pub async fn signed_in_user(app: &TestApp, name: &str, email: &str) -> (i64, String) {
    let registered = register_user(app, name, email).await;
    let id = registered.body["id"].as_i64().unwrap();

    let logged_in = login_user(app, email, TEST_PASSWORD).await;
    let cookie = session_cookie(&logged_in).unwrap();
    (id, cookie)
}

//! Integration tests for the login, logout, refresh and current-user flow.

mod helpers;

use http::StatusCode;

async fn app_with_user() -> helpers::TestApp {
    let app = helpers::TestApp::new().await;
    let response = app.register_user("bob", "bob@x.com", "password123").await;
    assert_eq!(response.status, StatusCode::CREATED);
    app
}

#[tokio::test]
async fn test_login_success_sets_cookies() {
    let app = app_with_user().await;

    let response = app.login("bob", "password123").await;

    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "User logged in successfully");
    assert_eq!(response.data()["user"]["username"], "bob");
    assert!(response.data()["user"].get("password").is_none());
    assert!(response.data()["user"].get("refreshToken").is_none());

    let access = response.cookie_value("accessToken").unwrap();
    let refresh = response.cookie_value("referenceToken").unwrap();
    assert_eq!(response.data()["accessToken"], access.as_str());
    assert_eq!(response.data()["referenceToken"], refresh.as_str());

    let raw = response.set_cookie("accessToken").unwrap();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/"));
    assert!(raw.contains("Max-Age=86"));

    let stored = app.stored_user("bob").await;
    assert_eq!(stored.refresh_token.as_deref(), Some(refresh.as_str()));
}

#[tokio::test]
async fn test_login_by_email() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "bob@x.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user"]["email"], "bob@x.com");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = app_with_user().await;
    let first = app.login("bob", "password123").await;
    let token_before = first.cookie_value("referenceToken");

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "bob",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid user credentials");
    assert!(response.set_cookies.is_empty());

    let stored = app.stored_user("bob").await;
    assert_eq!(stored.refresh_token, token_before);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "User does not exist");
}

#[tokio::test]
async fn test_login_requires_identifier() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Username or email is required");
}

#[tokio::test]
async fn test_login_whitespace_password() {
    let app = app_with_user().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "bob",
                "password": "   ",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Password is required");
    assert!(response.set_cookies.is_empty());
}

#[tokio::test]
async fn test_error_envelope_shape() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "ghost", "password": "x" })),
            None,
        )
        .await;

    assert_eq!(response.body["statusCode"], 404);
    assert_eq!(response.body["success"], false);
    assert!(response.body["errors"].is_array());
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;

    let response = app
        .request("POST", "/logout", None, Some(&login.session_cookie_header()))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User logged out");
    assert!(
        response
            .set_cookie("accessToken")
            .unwrap()
            .contains("Max-Age=0")
    );
    assert!(
        response
            .set_cookie("referenceToken")
            .unwrap()
            .contains("Max-Age=0")
    );

    let stored = app.stored_user("bob").await;
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;
    let old_refresh = login.cookie_value("referenceToken").unwrap();

    let response = app
        .request(
            "POST",
            "/refresh-token",
            None,
            Some(&login.session_cookie_header()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_refresh = response.cookie_value("referenceToken").unwrap();
    assert_ne!(new_refresh, old_refresh);
    assert_eq!(response.data()["referenceToken"], new_refresh.as_str());

    let stored = app.stored_user("bob").await;
    assert_eq!(stored.refresh_token.as_deref(), Some(new_refresh.as_str()));

    // The rotated-out token is no longer accepted.
    let replay = app
        .request(
            "POST",
            "/refresh-token",
            Some(serde_json::json!({ "referenceToken": old_refresh })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["message"], "Refresh token is expired or used");
}

#[tokio::test]
async fn test_refresh_after_logout_rejected() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;
    let cookies = login.session_cookie_header();

    app.request("POST", "/logout", None, Some(&cookies)).await;

    let response = app
        .request("POST", "/refresh-token", None, Some(&cookies))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/refresh-token", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized request");
}

#[tokio::test]
async fn test_current_user_with_cookie() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;

    let response = app
        .request(
            "GET",
            "/current-user",
            None,
            Some(&login.session_cookie_header()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "bob");
    assert!(response.data().get("password").is_none());
}

#[tokio::test]
async fn test_current_user_with_bearer_under_prefix() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;
    let access = login.cookie_value("accessToken").unwrap();

    let response = app
        .request_with_bearer("GET", "/api/v1/users/current-user", &access)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "bob@x.com");
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/current-user", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_current_user_rejects_refresh_token() {
    let app = app_with_user().await;
    let login = app.login("bob", "password123").await;
    let refresh = login.cookie_value("referenceToken").unwrap();

    let response = app
        .request_with_bearer("GET", "/current-user", &refresh)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], true);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/does-not-exist", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Route not found");
}

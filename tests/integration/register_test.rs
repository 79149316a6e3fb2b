//! Integration tests for multipart user registration.

mod helpers;

use helpers::MultipartBody;
use http::StatusCode;

fn alice_form() -> MultipartBody {
    MultipartBody::new()
        .text("fullname", "Alice A")
        .text("email", "a@x.com")
        .text("username", "alice")
        .text("password", "secret1")
}

#[tokio::test]
async fn test_register_success() {
    let app = helpers::TestApp::new().await;

    let response = app
        .multipart(
            "/register",
            alice_form().file("avatar", "me.png", "image/png", b"png bytes"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["statusCode"], 201);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "User registered successfully");

    let data = response.data();
    assert_eq!(data["username"], "alice");
    assert_eq!(data["email"], "a@x.com");
    assert_eq!(data["fullname"], "Alice A");
    assert!(
        data["avatar"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:5000/media/")
    );
    assert_eq!(data["coverImage"], "");
    assert!(data.get("password").is_none());
    assert!(data.get("refreshToken").is_none());

    let stored = app.stored_user("alice").await;
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.refresh_token.is_none());
}

#[tokio::test]
async fn test_register_uploaded_avatar_is_served() {
    let app = helpers::TestApp::new().await;

    let response = app
        .multipart(
            "/register",
            alice_form().file("avatar", "me.png", "image/png", b"png bytes"),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let url = response.data()["avatar"].as_str().unwrap().to_string();
    let path = url.trim_start_matches("http://localhost:5000");

    assert_eq!(app.get_status(path).await, StatusCode::OK);
}

#[tokio::test]
async fn test_register_with_cover_image() {
    let app = helpers::TestApp::new().await;

    let response = app
        .multipart(
            "/api/v1/users/register",
            alice_form()
                .file("avatar", "me.png", "image/png", b"png bytes")
                .file("coverImage", "cover.jpg", "image/jpeg", b"jpg bytes"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let cover = response.data()["coverImage"].as_str().unwrap();
    assert!(cover.ends_with(".jpg"));
}

#[tokio::test]
async fn test_register_normalizes_username() {
    let app = helpers::TestApp::new().await;

    let body = MultipartBody::new()
        .text("fullname", "Carol C")
        .text("email", "c@x.com")
        .text("username", "Carol")
        .text("password", "secret1")
        .file("avatar", "c.png", "image/png", b"png bytes");

    let response = app.multipart("/register", body).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["username"], "carol");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = helpers::TestApp::new().await;
    app.multipart(
        "/register",
        alice_form().file("avatar", "me.png", "image/png", b"png bytes"),
    )
    .await;

    let body = MultipartBody::new()
        .text("fullname", "Alice B")
        .text("email", "other@x.com")
        .text("username", "alice")
        .text("password", "secret2")
        .file("avatar", "me.png", "image/png", b"png bytes");

    let response = app.multipart("/register", body).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "User already exists");
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new().await;
    app.register_user("dave", "d@x.com", "secret1").await;

    let response = app.register_user("dave2", "d@x.com", "secret1").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_blank_field() {
    let app = helpers::TestApp::new().await;

    let body = MultipartBody::new()
        .text("fullname", "   ")
        .text("email", "a@x.com")
        .text("username", "alice")
        .text("password", "secret1")
        .file("avatar", "me.png", "image/png", b"png bytes");

    let response = app.multipart("/register", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please fill in all fields");
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = helpers::TestApp::new().await;

    let body = MultipartBody::new()
        .text("fullname", "Alice A")
        .text("username", "alice")
        .text("password", "secret1")
        .file("avatar", "me.png", "image/png", b"png bytes");

    let response = app.multipart("/register", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_missing_avatar() {
    let app = helpers::TestApp::new().await;

    let response = app.multipart("/register", alice_form()).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please upload an avatar");

    let exists = app.store.is_empty().await;
    assert!(exists);
}

#[tokio::test]
async fn test_register_rejects_non_image_avatar() {
    let app = helpers::TestApp::new().await;

    let response = app
        .multipart(
            "/register",
            alice_form().file("avatar", "page.html", "text/html", b"<script>alert(1)</script>"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Avatar must be an image")
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_requires_multipart() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(serde_json::json!({ "username": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

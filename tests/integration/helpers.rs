//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use accounthub_api::{AppState, build_app};
use accounthub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use accounthub_core::config::{AppConfig, DatabaseProvider};
use accounthub_database::{MemoryUserRepository, UserStore};
use accounthub_entity::user::User;
use accounthub_service::AccountService;
use accounthub_storage::LocalMediaUploader;

/// Multipart boundary used by [`MultipartBody`].
const BOUNDARY: &str = "accounthub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory user store shared with the router
    pub store: MemoryUserRepository,
    /// Application config
    pub config: AppConfig,
    /// Keeps the uploaded media directory alive for the test
    _media_dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by the in-memory store
    pub async fn new() -> Self {
        let media_dir = TempDir::new().expect("Failed to create media dir");
        let media_root = media_dir.path().to_string_lossy().to_string();

        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.server.cookie_secure = false;
        config.auth.access_token_secret = "integration-access-secret".to_string();
        config.auth.refresh_token_secret = "integration-refresh-secret".to_string();
        config.storage.local.root_path = media_root.clone();
        config.storage.local.public_base_url = "http://localhost:5000/media".to_string();

        let store = MemoryUserRepository::new();
        let uploader = LocalMediaUploader::new(&media_root, &config.storage.local.public_base_url)
            .await
            .expect("Failed to init uploader");

        let account_service = Arc::new(AccountService::new(
            Arc::new(store.clone()),
            Arc::new(uploader),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));

        let state = AppState::new(Arc::new(config.clone()), account_service);
        let router = build_app(state);

        Self {
            router,
            store,
            config,
            _media_dir: media_dir,
        }
    }

    /// Register a user with an avatar through the HTTP API
    pub async fn register_user(&self, username: &str, email: &str, password: &str) -> TestResponse {
        let body = MultipartBody::new()
            .text("fullname", &format!("{username} Test"))
            .text("email", email)
            .text("username", username)
            .text("password", password)
            .file("avatar", "avatar.png", "image/png", b"fake png bytes");

        self.multipart("/register", body).await
    }

    /// Login and return the response carrying the session cookies
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
    }

    /// Look up a stored user directly
    pub async fn stored_user(&self, username: &str) -> User {
        self.store
            .find_by_username_or_email(Some(username), None)
            .await
            .expect("Store lookup failed")
            .expect("User not found in store")
    }

    /// Make a JSON request to the test app, optionally with a `Cookie` header
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request authenticated with a bearer token
    pub async fn request_with_bearer(&self, method: &str, path: &str, token: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a `multipart/form-data` POST
    pub async fn multipart(&self, path: &str, body: MultipartBody) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body.finish()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a raw GET and return only the status
    pub async fn get_status(&self, path: &str) -> StatusCode {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request")
            .status()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the named cookie
    pub fn set_cookie(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.set_cookies
            .iter()
            .find(|c| c.starts_with(&prefix))
            .map(String::as_str)
    }

    /// Value of the named cookie as set by this response
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let raw = self.set_cookie(name)?;
        let pair = raw.split(';').next()?;
        pair.split_once('=').map(|(_, v)| v.to_string())
    }

    /// `Cookie` request header replaying both session cookies
    pub fn session_cookie_header(&self) -> String {
        format!(
            "accessToken={}; referenceToken={}",
            self.cookie_value("accessToken").unwrap_or_default(),
            self.cookie_value("referenceToken").unwrap_or_default()
        )
    }

    /// `body.data`
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Minimal `multipart/form-data` body builder
#[derive(Debug, Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

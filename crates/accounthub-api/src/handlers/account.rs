//! Account handlers: register, login, logout, refresh-token, current-user.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use validator::Validate;

use accounthub_core::error::AppError;
use accounthub_core::traits::media::UploadedFile;
use accounthub_entity::user::UserProfile;
use accounthub_service::{LoginInput, RegisterInput};

use crate::cookies::{
    REFRESH_COOKIE_NAME, clear_session_cookies, cookie_value, set_session_cookies,
};
use crate::dto::request::{LoginRequest, RefreshRequest, RegisterForm};
use crate::dto::response::{ApiResponse, Empty, LoginResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Multipart field carrying the avatar file.
const AVATAR_FIELD: &str = "avatar";
/// Multipart field carrying the cover image file.
const COVER_IMAGE_FIELD: &str = "coverImage";

async fn read_file(field: Field<'_>) -> Result<UploadedFile, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(String::from);
    let data = field.bytes().await?;
    Ok(UploadedFile::new(file_name, content_type, data))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let mut multipart = multipart?;
    let mut form = RegisterForm::default();
    let mut avatar: Option<UploadedFile> = None;
    let mut cover_image: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            AVATAR_FIELD => {
                let file = read_file(field).await?;
                avatar.get_or_insert(file);
            }
            COVER_IMAGE_FIELD => {
                let file = read_file(field).await?;
                cover_image.get_or_insert(file);
            }
            _ => {
                let value = field.text().await?;
                form.set(&name, value);
            }
        }
    }

    if form.validate().is_err() {
        return Err(AppError::missing_field("Please fill in all fields").into());
    }

    let profile = state
        .account_service
        .register(RegisterInput {
            username: form.username,
            email: form.email,
            fullname: form.fullname,
            password: form.password,
            avatar,
            cover_image,
        })
        .await?;

    Ok(ApiResponse::created(profile, "User registered successfully"))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), ApiError> {
    let Json(req) = body?;

    let outcome = state
        .account_service
        .login(LoginInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = set_session_cookies(jar, &outcome.tokens, state.config.server.cookie_secure);

    Ok((
        jar,
        ApiResponse::ok(
            LoginResponse {
                user: outcome.user,
                access_token: outcome.tokens.access_token,
                reference_token: outcome.tokens.refresh_token,
            },
            "User logged in successfully",
        ),
    ))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<Empty>), ApiError> {
    state.account_service.logout(auth.context()).await?;

    Ok((
        clear_session_cookies(jar, state.config.server.cookie_secure),
        ApiResponse::ok(Empty {}, "User logged out"),
    ))
}

/// POST /refresh-token
///
/// The refresh token comes from the cookie, or from a JSON body
/// `{"referenceToken": "..."}` when no cookie is sent.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), ApiError> {
    let token = match cookie_value(&jar, REFRESH_COOKIE_NAME) {
        Some(token) => Some(token),
        None if body.is_empty() => None,
        None => serde_json::from_slice::<RefreshRequest>(&body)
            .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))?
            .reference_token,
    };

    let tokens = state.account_service.refresh(token.as_deref()).await?;
    let jar = set_session_cookies(jar, &tokens, state.config.server.cookie_secure);

    Ok((
        jar,
        ApiResponse::ok(
            TokenResponse {
                access_token: tokens.access_token,
                reference_token: tokens.refresh_token,
            },
            "Access token refreshed",
        ),
    ))
}

/// GET /current-user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let profile = state.account_service.current_user(auth.context()).await?;
    Ok(ApiResponse::ok(profile, "Current user fetched successfully"))
}

//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use accounthub_core::error::AppError;

/// A registered user, as stored.
///
/// `password_hash` and `refresh_token` are never serialized; responses use
/// [`UserProfile`](super::UserProfile) instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, always lowercase.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Full display name.
    pub fullname: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL, empty when none was uploaded.
    pub cover_image: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Refresh token issued at the last login, cleared on logout.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether `token` is the refresh token currently on record.
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Username, already normalized.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full display name.
    pub fullname: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL (empty when absent).
    pub cover_image: String,
}

impl NewUser {
    /// Build a creation payload, normalizing the username to lowercase.
    pub fn new(
        username: &str,
        email: &str,
        fullname: &str,
        password_hash: String,
        avatar: String,
        cover_image: Option<String>,
    ) -> Result<Self, AppError> {
        if avatar.is_empty() {
            return Err(AppError::missing_avatar("Avatar is required"));
        }
        Ok(Self {
            username: normalize_username(username),
            email: email.trim().to_string(),
            fullname: fullname.trim().to_string(),
            password_hash,
            avatar,
            cover_image: cover_image.unwrap_or_default(),
        })
    }
}

/// Canonical stored form of a username.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

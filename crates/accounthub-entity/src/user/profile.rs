//! Sanitized user projection returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::model::User;

/// Public view of a user: everything except the credential and session
/// secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: Uuid,
    /// Lowercase username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full display name.
    pub fullname: String,
    /// Avatar URL.
    pub avatar: String,
    /// Cover image URL, empty when none was uploaded.
    pub cover_image: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            fullname: user.fullname,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

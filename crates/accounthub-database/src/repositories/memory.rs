//! In-memory user store for tests and single-process development runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_entity::user::{NewUser, User, UserProfile};

use super::user::UserStore;

/// User store backed by a `HashMap` behind a Tokio `RwLock`.
///
/// Uniqueness of username and email is checked under the write lock, so
/// concurrent inserts behave like the database unique constraints.
/// Nothing is persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let username = username.map(str::to_lowercase);
        let users = self.users.read().await;

        let found = users
            .values()
            .filter(|u| {
                username.as_deref() == Some(u.username.as_str()) || email == Some(u.email.as_str())
            })
            .min_by_key(|u| u.created_at)
            .cloned();

        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_profile_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self
            .users
            .read()
            .await
            .get(&id)
            .cloned()
            .map(UserProfile::from))
    }

    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username == data.username || u.email == data.email)
        {
            return Err(AppError::duplicate_user("User already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            fullname: data.fullname.clone(),
            avatar: data.avatar.clone(),
            cover_image: data.cover_image.clone(),
            password_hash: data.password_hash.clone(),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.refresh_token = token.map(str::to_string);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

//! Account service wiring and profile lookups.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use accounthub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use accounthub_core::error::AppError;
use accounthub_core::traits::media::MediaUploader;
use accounthub_database::UserStore;
use accounthub_entity::user::UserProfile;

use crate::context::RequestContext;

/// Orchestrates the account workflows over the user store, media uploader
/// and credential helpers.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User persistence.
    pub(crate) users: Arc<dyn UserStore>,
    /// Avatar / cover-image uploader.
    pub(crate) uploader: Arc<dyn MediaUploader>,
    /// Password hasher.
    pub(crate) hasher: Arc<PasswordHasher>,
    /// Token signer.
    pub(crate) encoder: Arc<JwtEncoder>,
    /// Token validator.
    pub(crate) decoder: Arc<JwtDecoder>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        uploader: Arc<dyn MediaUploader>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            uploader,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Returns the sanitized profile of the authenticated user.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<UserProfile, AppError> {
        self.profile(ctx.user_id).await?.ok_or_else(|| {
            warn!(user_id = %ctx.user_id, "Access token refers to a missing user");
            AppError::unauthorized("Invalid access token")
        })
    }

    /// Validates an access token and returns the request context it carries.
    pub fn authenticate(&self, access_token: &str) -> Result<RequestContext, AppError> {
        let claims = self
            .decoder
            .decode_access_token(access_token)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {}", e.message)))?;
        Ok(RequestContext::from_claims(claims))
    }

    /// Store health, for the health endpoint.
    pub async fn store_healthy(&self) -> bool {
        self.users.health_check().await.unwrap_or(false)
    }

    /// Uploader health, for the health endpoint.
    pub async fn uploader_healthy(&self) -> bool {
        self.uploader.health_check().await.unwrap_or(false)
    }

    pub(crate) async fn profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        self.users.find_profile_by_id(user_id).await
    }
}

//! User registration.

use tracing::{info, warn};

use accounthub_core::error::AppError;
use accounthub_core::traits::media::{IMAGE_EXTENSIONS, UploadedFile};
use accounthub_entity::user::{NewUser, UserProfile, normalize_username};

use super::service::AccountService;

/// Registration payload as received from the client.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full display name.
    pub fullname: String,
    /// Plaintext password.
    pub password: String,
    /// Avatar file (required).
    pub avatar: Option<UploadedFile>,
    /// Cover image file (optional).
    pub cover_image: Option<UploadedFile>,
}

impl RegisterInput {
    fn has_blank_field(&self) -> bool {
        [&self.username, &self.email, &self.fullname, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

/// Rejects files that are not an accepted image type.
fn ensure_image(file: &UploadedFile, label: &str) -> Result<(), AppError> {
    if file.image_extension().is_none() {
        return Err(AppError::validation(format!(
            "{label} must be an image ({})",
            IMAGE_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

impl AccountService {
    /// Registers a new user.
    ///
    /// The avatar is uploaded first, then the optional cover image. Uploads
    /// are not removed if the insert fails afterwards.
    pub async fn register(&self, input: RegisterInput) -> Result<UserProfile, AppError> {
        if input.has_blank_field() {
            return Err(AppError::missing_field("Please fill in all fields"));
        }

        let username = normalize_username(&input.username);
        let email = input.email.trim();

        if self
            .users
            .find_by_username_or_email(Some(&username), Some(email))
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_user("User already exists"));
        }

        let avatar_file = input
            .avatar
            .as_ref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AppError::missing_avatar("Please upload an avatar"))?;
        ensure_image(avatar_file, "Avatar")?;
        if let Some(cover) = input.cover_image.as_ref().filter(|f| !f.is_empty()) {
            ensure_image(cover, "Cover image")?;
        }

        let avatar = self.uploader.upload(avatar_file).await?;
        let cover_image = match input.cover_image.as_ref() {
            Some(file) => self.uploader.upload(file).await?,
            None => None,
        };

        let avatar = avatar.ok_or_else(|| {
            warn!(username = %username, "Avatar upload produced no URL");
            AppError::missing_avatar("Avatar is required")
        })?;

        let password_hash = self.hasher.hash_password(&input.password)?;

        let new_user = NewUser::new(
            &username,
            email,
            &input.fullname,
            password_hash,
            avatar.url,
            cover_image.map(|m| m.url),
        )?;

        let user = self.users.create(&new_user).await?;

        let profile = self.profile(user.id).await?.ok_or_else(|| {
            AppError::creation_failed("Something went wrong while registering a user")
        })?;

        info!(user_id = %profile.id, username = %profile.username, "User registered");

        Ok(profile)
    }
}

//! Login, logout, token pair generation and refresh-token rotation.

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use accounthub_auth::{TokenPair, TokenSubject};
use accounthub_core::error::AppError;
use accounthub_entity::user::{UserProfile, normalize_username};

use super::service::AccountService;
use crate::context::RequestContext;

/// Login credentials. At least one of `username` or `email` is required.
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    /// Username, matched case-insensitively.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
}

/// A successful login: the user and a freshly issued token pair.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Sanitized user profile.
    pub user: UserProfile,
    /// Issued tokens.
    pub tokens: TokenPair,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AccountService {
    /// Authenticates a user and issues a new token pair.
    ///
    /// A wrong password leaves the stored refresh token untouched.
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, AppError> {
        let username = non_blank(input.username.as_deref()).map(normalize_username);
        let email = non_blank(input.email.as_deref());

        if username.is_none() && email.is_none() {
            return Err(AppError::missing_field("Username or email is required"));
        }
        if input.password.trim().is_empty() {
            return Err(AppError::missing_field("Password is required"));
        }

        let user = self
            .users
            .find_by_username_or_email(username.as_deref(), email)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        if !self
            .hasher
            .verify_password(&input.password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized("Invalid user credentials"));
        }

        let tokens = self.generate_token_pair(user.id).await?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user: UserProfile::from(user),
            tokens,
        })
    }

    /// Clears the stored refresh token of the authenticated user.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let updated = self.users.set_refresh_token(ctx.user_id, None).await?;
        if !updated {
            warn!(user_id = %ctx.user_id, "Logout for a user that no longer exists");
        }

        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }

    /// Exchanges the current refresh token for a new pair.
    ///
    /// The presented token must be the one on record, so each refresh token
    /// works once and none works after logout.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, AppError> {
        let token = non_blank(refresh_token)
            .ok_or_else(|| AppError::unauthorized("Unauthorized request"))?;

        let claims = self
            .decoder
            .decode_refresh_token(token)
            .map_err(|e| AppError::unauthorized(format!("Invalid refresh token: {}", e.message)))?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        if !user.holds_refresh_token(token) {
            warn!(user_id = %user.id, "Stale refresh token presented");
            return Err(AppError::unauthorized("Refresh token is expired or used"));
        }

        let tokens = self.generate_token_pair(user.id).await?;

        info!(user_id = %user.id, "Access token refreshed");
        Ok(tokens)
    }

    /// Loads the user, mints an access + refresh pair and stores the refresh
    /// token. Every failure is reported as `TokenGenerationFailed`.
    pub async fn generate_token_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        let failed = || {
            AppError::token_generation_failed(
                "Something went wrong while generating refresh and access token",
            )
        };

        let user = match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!(user_id = %user_id, "Token generation for unknown user");
                return Err(failed());
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Token generation lookup failed");
                return Err(failed());
            }
        };

        let subject = TokenSubject {
            user_id: user.id,
            username: user.username,
            email: user.email,
            fullname: user.fullname,
        };

        let tokens = self.encoder.generate_token_pair(&subject).map_err(|e| {
            error!(user_id = %user_id, error = %e, "Token encoding failed");
            failed()
        })?;

        match self
            .users
            .set_refresh_token(user_id, Some(&tokens.refresh_token))
            .await
        {
            Ok(true) => Ok(tokens),
            Ok(false) => {
                error!(user_id = %user_id, "User vanished while storing refresh token");
                Err(failed())
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to store refresh token");
                Err(failed())
            }
        }
    }
}

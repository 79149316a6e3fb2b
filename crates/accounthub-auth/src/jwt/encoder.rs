//! JWT token creation with separate access and refresh secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use accounthub_core::config::AuthConfig;
use accounthub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims, TokenType};

/// Identity data copied into an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// User ID.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Full name.
    pub fullname: String,
}

/// A freshly minted access + refresh token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Creates signed HS256 access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_ttl_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days as i64),
        }
    }

    /// Generates a new access + refresh token pair for the given subject.
    pub fn generate_token_pair(&self, subject: &TokenSubject) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.generate_access_token(subject)?;
        let (refresh_token, refresh_expires_at) = self.generate_refresh_token(subject.user_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Generates a standalone access token.
    pub fn generate_access_token(
        &self,
        subject: &TokenSubject,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.access_ttl;

        let claims = AccessClaims {
            sub: subject.user_id,
            username: subject.username.clone(),
            email: subject.email.clone(),
            fullname: subject.fullname.clone(),
            token_type: TokenType::Access,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.access_key).map_err(|e| {
            AppError::token_generation_failed(format!("Failed to encode access token: {e}"))
        })?;

        Ok((token, exp))
    }

    /// Generates a standalone refresh token.
    pub fn generate_refresh_token(
        &self,
        user_id: Uuid,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + self.refresh_ttl;

        let claims = RefreshClaims {
            sub: user_id,
            token_type: TokenType::Refresh,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key).map_err(|e| {
            AppError::token_generation_failed(format!("Failed to encode refresh token: {e}"))
        })?;

        Ok((token, exp))
    }
}

//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing configuration.
///
/// Access and refresh tokens are signed with separate HMAC-SHA256 secrets
/// so that a leaked access secret cannot mint refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing.
    #[serde(default = "default_access_secret")]
    pub access_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Secret key for refresh token signing.
    #[serde(default = "default_refresh_secret")]
    pub refresh_token_secret: String,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
}

impl AuthConfig {
    /// Whether either secret is still the shipped placeholder.
    pub fn uses_placeholder_secrets(&self) -> bool {
        self.access_token_secret == default_access_secret()
            || self.refresh_token_secret == default_refresh_secret()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: default_access_secret(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_secret: default_refresh_secret(),
            refresh_token_ttl_days: default_refresh_ttl(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_ACCESS_SECRET".to_string()
}

fn default_access_ttl() -> u64 {
    24 * 60
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_REFRESH_SECRET".to_string()
}

fn default_refresh_ttl() -> u64 {
    10
}

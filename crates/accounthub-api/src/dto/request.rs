//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Text fields of the registration form.
///
/// Missing fields deserialize to empty strings so that they fail the same
/// check as blank ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    /// Username.
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    /// Email.
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    /// Full name.
    #[validate(custom(function = "not_blank"))]
    pub fullname: String,
    /// Password.
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl RegisterForm {
    /// Stores a text field by its multipart name; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "username" => self.username = value,
            "email" => self.email = value,
            "fullname" => self.fullname = value,
            "password" => self.password = value,
            _ => {}
        }
    }
}

/// Login request body. At least one of `username` or `email` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Password.
    pub password: String,
}

/// Token refresh request body, used when the cookie is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshRequest {
    /// Refresh token.
    pub reference_token: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

//! # accounthub-auth
//!
//! Credential handling for AccountHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and validation
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder, RefreshClaims, TokenPair, TokenSubject};
pub use password::PasswordHasher;

//! # accounthub-core
//!
//! Core crate for AccountHub. Contains configuration schemas, the media
//! upload trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AccountHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

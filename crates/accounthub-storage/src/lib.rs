//! # accounthub-storage
//!
//! Media upload providers for AccountHub. Files land on the local
//! filesystem by default, or in a Cloudinary account with the
//! `cloudinary` feature.

pub mod factory;
pub mod providers;

pub use factory::build_uploader;
pub use providers::LocalMediaUploader;
#[cfg(feature = "cloudinary")]
pub use providers::CloudinaryUploader;

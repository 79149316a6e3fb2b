//! Media uploader implementations.

#[cfg(feature = "cloudinary")]
pub mod cloudinary;
pub mod local;

#[cfg(feature = "cloudinary")]
pub use cloudinary::CloudinaryUploader;
pub use local::LocalMediaUploader;

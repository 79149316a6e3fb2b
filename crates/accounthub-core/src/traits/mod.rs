//! Core traits defined in `accounthub-core` and implemented by other crates.

pub mod media;

pub use media::{IMAGE_EXTENSIONS, MediaUploader, UploadedFile, UploadedMedia};

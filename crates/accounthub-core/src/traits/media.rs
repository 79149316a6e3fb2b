//! Media uploader trait for pluggable image hosting backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Extensions accepted for avatar and cover-image uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// A file received from a multipart form, held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name (may be empty).
    pub file_name: String,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Create a new uploaded file.
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Whether the upload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowercased extension taken from the client file name.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// The extension, if the file looks like a raster image.
    ///
    /// The name must end in one of [`IMAGE_EXTENSIONS`] and a declared
    /// content type, when present, must be `image/*`.
    pub fn image_extension(&self) -> Option<String> {
        let ext = self.extension()?;
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        match &self.content_type {
            Some(ct) if !ct.trim().to_ascii_lowercase().starts_with("image/") => None,
            _ => Some(ext),
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadedMedia {
    /// Publicly reachable URL of the stored media.
    pub url: String,
    /// Provider-specific identifier (file name, public id).
    pub public_id: String,
    /// Size in bytes as stored.
    pub size_bytes: u64,
}

/// Trait for media hosting backends.
///
/// `Ok(None)` means the provider accepted the request but produced no
/// accessible URL; callers decide whether that is fatal. `Err` is reserved
/// for failures the provider could not absorb.
#[async_trait]
pub trait MediaUploader: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "cloudinary").
    fn provider_type(&self) -> &str;

    /// Store a file and return where it can be fetched from.
    async fn upload(&self, file: &UploadedFile) -> AppResult<Option<UploadedMedia>>;

    /// Check whether the provider is usable.
    async fn health_check(&self) -> AppResult<bool>;
}

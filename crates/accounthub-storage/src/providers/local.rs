//! Local filesystem media uploader.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use accounthub_core::config::LocalStorageConfig;
use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_core::traits::media::{MediaUploader, UploadedFile, UploadedMedia};

/// Writes uploads under a root directory and hands out URLs below a
/// public base URL.
#[derive(Debug, Clone)]
pub struct LocalMediaUploader {
    /// Directory that receives stored files.
    root: PathBuf,
    /// Public URL prefix for `root`, without a trailing slash.
    public_base_url: String,
}

impl LocalMediaUploader {
    /// Create a new uploader, creating the root directory if needed.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create media root: {}", root.display()),
                e,
            )
        })?;

        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create an uploader from the `storage.local` configuration section.
    pub async fn from_config(config: &LocalStorageConfig) -> AppResult<Self> {
        Self::new(&config.root_path, &config.public_base_url).await
    }

    /// Directory uploads are written to.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// `<uuid>.<ext>` for image files; anything else is refused, since
    /// stored files are served from the API's own origin.
    fn stored_name(file: &UploadedFile) -> AppResult<String> {
        let ext = file.image_extension().ok_or_else(|| {
            AppError::validation(format!(
                "Unsupported media file '{}'; expected an image",
                file.file_name
            ))
        })?;
        Ok(format!("{}.{ext}", Uuid::new_v4()))
    }
}

#[async_trait]
impl MediaUploader for LocalMediaUploader {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn upload(&self, file: &UploadedFile) -> AppResult<Option<UploadedMedia>> {
        if file.is_empty() {
            debug!(file_name = %file.file_name, "Skipping empty upload");
            return Ok(None);
        }

        let name = Self::stored_name(file)?;
        let full_path = self.root.join(&name);

        fs::write(&full_path, &file.data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write media file: {name}"),
                e,
            )
        })?;

        debug!(file = %name, bytes = file.data.len(), "Stored media file");

        Ok(Some(UploadedMedia {
            url: format!("{}/{name}", self.public_base_url),
            public_id: name,
            size_bytes: file.data.len() as u64,
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }
}

//! Builds the configured media uploader.

use std::sync::Arc;

use tracing::info;

use accounthub_core::config::{StorageConfig, StorageProviderKind};
use accounthub_core::result::AppResult;
use accounthub_core::traits::media::MediaUploader;

use crate::providers::LocalMediaUploader;

/// Instantiate the uploader selected by `storage.provider`.
pub async fn build_uploader(config: &StorageConfig) -> AppResult<Arc<dyn MediaUploader>> {
    let uploader: Arc<dyn MediaUploader> = match config.provider {
        StorageProviderKind::Local => {
            Arc::new(LocalMediaUploader::from_config(&config.local).await?)
        }
        StorageProviderKind::Cloudinary => cloudinary(config)?,
    };

    info!(provider = uploader.provider_type(), "Media uploader ready");
    Ok(uploader)
}

#[cfg(feature = "cloudinary")]
fn cloudinary(config: &StorageConfig) -> AppResult<Arc<dyn MediaUploader>> {
    Ok(Arc::new(crate::providers::CloudinaryUploader::new(
        &config.cloudinary,
    )?))
}

#[cfg(not(feature = "cloudinary"))]
fn cloudinary(_config: &StorageConfig) -> AppResult<Arc<dyn MediaUploader>> {
    Err(accounthub_core::error::AppError::configuration(
        "storage.provider = \"cloudinary\" requires building with the `cloudinary` feature",
    ))
}

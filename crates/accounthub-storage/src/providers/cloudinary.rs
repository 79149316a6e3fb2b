//! Cloudinary media uploader.
//!
//! Uses the signed upload endpoint: the request carries the API key, a
//! timestamp and a hex digest (SHA-1 by default, SHA-256 when the account
//! is configured for it) of the sorted parameters plus the API secret.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use accounthub_core::config::{CloudinaryStorageConfig, SignatureAlgorithm};
use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_core::traits::media::{MediaUploader, UploadedFile, UploadedMedia};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Subset of the Cloudinary upload response that is used.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: Option<String>,
    url: Option<String>,
    #[serde(default)]
    bytes: u64,
}

/// Pushes uploads to a Cloudinary account.
#[derive(Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: Option<String>,
    signature_algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryUploader")
            .field("cloud_name", &self.cloud_name)
            .field("folder", &self.folder)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

impl CloudinaryUploader {
    /// Create a new uploader from the `storage.cloudinary` configuration section.
    pub fn new(config: &CloudinaryStorageConfig) -> AppResult<Self> {
        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty()
        {
            return Err(AppError::configuration(
                "storage.cloudinary requires cloud_name, api_key and api_secret",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build Cloudinary HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: Some(config.folder.clone()).filter(|f| !f.is_empty()),
            signature_algorithm: config.signature_algorithm,
        })
    }

    fn upload_url(&self) -> String {
        format!("{API_BASE}/{}/auto/upload", self.cloud_name)
    }

    /// Parameters that take part in the signature, sorted by name.
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![("timestamp", timestamp.to_string())];
        if let Some(folder) = &self.folder {
            params.push(("folder", folder.clone()));
        }
        params.sort_by(|a, b| a.0.cmp(b.0));
        params
    }

    fn sign(&self, params: &[(&'static str, String)]) -> String {
        let joined = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        match self.signature_algorithm {
            SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&joined, &self.api_secret),
            SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&joined, &self.api_secret),
        }
    }

    async fn send(&self, file: &UploadedFile) -> AppResult<UploadResponse> {
        let request_failed = |e: reqwest::Error| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Cloudinary request failed: {e}"),
                e,
            )
        };

        let params = self.signed_params(Utc::now().timestamp());
        let signature = self.sign(&params);

        let mut part = Part::bytes(file.data.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type).map_err(request_failed)?;
        }

        let mut form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .part("file", part);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Cloudinary API error ({status}): {body}"
            )));
        }

        response.json::<UploadResponse>().await.map_err(request_failed)
    }
}

fn hex_digest<D: Digest>(payload: &str, secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    fn provider_type(&self) -> &str {
        "cloudinary"
    }

    async fn upload(&self, file: &UploadedFile) -> AppResult<Option<UploadedMedia>> {
        if file.is_empty() {
            return Ok(None);
        }

        match self.send(file).await {
            Ok(response) => {
                debug!(public_id = %response.public_id, "Uploaded media to Cloudinary");
                Ok(response
                    .secure_url
                    .or(response.url)
                    .map(|url| UploadedMedia {
                        url,
                        public_id: response.public_id,
                        size_bytes: response.bytes,
                    }))
            }
            Err(e) => {
                error!(file_name = %file.file_name, error = %e, "Cloudinary upload failed");
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.cloud_name.is_empty())
    }
}

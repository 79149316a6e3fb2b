//! Shared fixtures for account service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use accounthub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use accounthub_core::config::AuthConfig;
use accounthub_core::result::AppResult;
use accounthub_core::traits::media::{MediaUploader, UploadedFile, UploadedMedia};
use accounthub_database::MemoryUserRepository;

use super::service::AccountService;

/// Uploader that records calls and returns synthetic URLs.
#[derive(Debug, Default)]
pub(crate) struct FakeUploader {
    uploads: AtomicUsize,
    yields_nothing: bool,
}

impl FakeUploader {
    pub(crate) fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    fn provider_type(&self) -> &str {
        "fake"
    }

    async fn upload(&self, file: &UploadedFile) -> AppResult<Option<UploadedMedia>> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.yields_nothing || file.is_empty() {
            return Ok(None);
        }
        let name = match file.extension() {
            Some(ext) => format!("{n}.{ext}"),
            None => n.to_string(),
        };
        Ok(Some(UploadedMedia {
            url: format!("http://media.test/{name}"),
            public_id: name,
            size_bytes: file.data.len() as u64,
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

pub(crate) fn image(name: &str) -> UploadedFile {
    UploadedFile::new(
        name,
        Some("image/png".to_string()),
        Bytes::from_static(b"image-bytes"),
    )
}

pub(crate) struct TestHarness {
    pub(crate) service: AccountService,
    pub(crate) store: MemoryUserRepository,
    pub(crate) uploader: Arc<FakeUploader>,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        Self::build(FakeUploader::default())
    }

    pub(crate) fn with_failing_uploads() -> Self {
        Self::build(FakeUploader {
            yields_nothing: true,
            ..FakeUploader::default()
        })
    }

    fn build(uploader: FakeUploader) -> Self {
        let config = AuthConfig {
            access_token_secret: "test-access".to_string(),
            refresh_token_secret: "test-refresh".to_string(),
            ..AuthConfig::default()
        };
        let store = MemoryUserRepository::new();
        let uploader = Arc::new(uploader);
        let service = AccountService::new(
            Arc::new(store.clone()),
            uploader.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config)),
        );

        Self {
            service,
            store,
            uploader,
        }
    }
}

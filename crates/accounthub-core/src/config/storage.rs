//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Which media uploader handles avatar and cover-image files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Files are written to disk and served by this process.
    Local,
    /// Files are pushed to a Cloudinary account.
    Cloudinary,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Active upload provider.
    #[serde(default = "default_provider")]
    pub provider: StorageProviderKind,
    /// Local filesystem settings.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// Cloudinary settings.
    #[serde(default)]
    pub cloudinary: CloudinaryStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            local: LocalStorageConfig::default(),
            cloudinary: CloudinaryStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory that receives uploaded media.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL prefix under which `root_path` is publicly reachable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Route the API serves `root_path` under (empty = not served).
    #[serde(default = "default_serve_path")]
    pub serve_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
            serve_path: default_serve_path(),
        }
    }
}

/// Digest Cloudinary expects on signed upload requests.
///
/// Accounts verify SHA-1 unless switched to SHA-256 in their security
/// settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

/// Cloudinary account credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CloudinaryStorageConfig {
    /// Cloud name.
    #[serde(default)]
    pub cloud_name: String,
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret used to sign upload requests.
    #[serde(default)]
    pub api_secret: String,
    /// Optional folder that uploads are placed in.
    #[serde(default)]
    pub folder: String,
    /// Signature digest; must match the account setting.
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,
}

fn default_provider() -> StorageProviderKind {
    StorageProviderKind::Local
}

fn default_local_root() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:5000/media".to_string()
}

fn default_serve_path() -> String {
    "/media".to_string()
}

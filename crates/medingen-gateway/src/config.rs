//! Gateway configuration.

use std::path::Path;
use std::time::Duration;

use std::sync::Arc;

use medingen_auth::{Storage, StorageSessionStore, DEFAULT_SESSION_KEY};
use medingen_catalog::TransformOptions;
use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "MEDINGEN_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where the backend lives and how responses are transformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend base URL, without a trailing path segment for endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Storage key holding the session object.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Discount and fallback policies for view models.
    #[serde(default)]
    pub transform: TransformOptions,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_storage_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            storage_key: default_storage_key(),
            transform: TransformOptions::default(),
        }
    }
}

impl GatewayConfig {
    /// Defaults, with the base URL taken from `MEDINGEN_API_URL` when set.
    pub fn from_env() -> Self {
        Self::default().with_env_override(std::env::var(API_URL_ENV).ok())
    }

    fn with_env_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                ApiError::Config(format!("Failed to parse JSON config {}: {}", path.display(), e))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                ApiError::Config(format!("Failed to parse TOML config {}: {}", path.display(), e))
            })
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_transform(mut self, transform: TransformOptions) -> Self {
        self.transform = transform;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Session store over `storage`, keyed by `storage_key`.
    pub fn session_store(&self, storage: Arc<dyn Storage>) -> StorageSessionStore {
        StorageSessionStore::with_key(storage, self.storage_key.clone())
    }
}

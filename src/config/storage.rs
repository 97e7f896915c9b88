//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::storage::DocumentFormat;

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Document format for the file backend
    #[serde(default)]
    pub format: DocumentFormat,

    /// Collection URL for the remote backend
    pub remote_url: Option<String>,

    /// Bearer token for the remote backend
    pub remote_token: Option<String>,

    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_secs: u64,
}

/// Where sessions live
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
    Remote,
}

impl StorageConfig {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::File if self.path.as_os_str().is_empty() => {
                Err(ValidationError::MissingRequired("storage.path"))
            }
            StorageBackend::Remote => {
                let url = self
                    .remote_url
                    .as_deref()
                    .ok_or(ValidationError::MissingRequired("storage.remote_url"))?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ValidationError::InvalidRemoteUrl);
                }
                if self.remote_timeout_secs == 0 {
                    return Err(ValidationError::InvalidTimeout);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            format: DocumentFormat::default(),
            remote_url: None,
            remote_token: None,
            remote_timeout_secs: default_remote_timeout(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/sessions")
}

fn default_remote_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_json_files() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.format, DocumentFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn remote_requires_http_url() {
        let config = StorageConfig {
            backend: StorageBackend::Remote,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("storage.remote_url"))
        );

        let config = StorageConfig {
            backend: StorageBackend::Remote,
            remote_url: Some("ftp://store".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRemoteUrl));

        let config = StorageConfig {
            backend: StorageBackend::Remote,
            remote_url: Some("https://store.example.com/sessions".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

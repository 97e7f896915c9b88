//! File-based Session Store Adapter
//!
//! Stores one document per session key under a base directory, as JSON
//! (`<key>.json`) or YAML (`<key>.yaml`). Writes go to a temporary sibling
//! file that is renamed over the target, so a crash never leaves a
//! half-written document behind.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionKey;
use crate::domain::intake::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    fn encode(&self, session: &Session) -> Result<String, SessionStoreError> {
        match self {
            DocumentFormat::Json => serde_json::to_string_pretty(session)
                .map_err(|e| SessionStoreError::Serialization(e.to_string())),
            DocumentFormat::Yaml => serde_yaml::to_string(session)
                .map_err(|e| SessionStoreError::Serialization(e.to_string())),
        }
    }

    fn decode(&self, raw: &str) -> Result<Session, SessionStoreError> {
        match self {
            DocumentFormat::Json => serde_json::from_str(raw)
                .map_err(|e| SessionStoreError::Deserialization(e.to_string())),
            DocumentFormat::Yaml => serde_yaml::from_str(raw)
                .map_err(|e| SessionStoreError::Deserialization(e.to_string())),
        }
    }
}

/// File-based storage for sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    format: DocumentFormat,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions", DocumentFormat::Json);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, format: DocumentFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Path of the document for `key`
    fn document_path(&self, key: &SessionKey) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key.as_str(), self.format.extension()))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError> {
        let path = self.document_path(key);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };

        self.format.decode(&raw).map(Some)
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let encoded = self.format.encode(session)?;
        let path = self.document_path(session.key());
        let tmp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        fs::write(&tmp_path, encoded)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.document_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::Io(e.to_string())),
        }
    }
}

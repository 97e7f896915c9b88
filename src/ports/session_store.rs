//! Session Store Port - Interface for persisting intake sessions.
//!
//! Backends store one document per [`SessionKey`] in the
//! [`SessionRecord`](crate::domain::intake::SessionRecord) shape. Callers
//! treat every error as non-fatal: a failed load starts a fresh session,
//! a failed save is logged.

use async_trait::async_trait;

use crate::domain::foundation::SessionKey;
use crate::domain::intake::Session;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize session: {0}")]
    Serialization(String),

    #[error("Failed to deserialize session: {0}")]
    Deserialization(String),

    #[error("Remote store error: {0}")]
    Remote(String),
}

/// Port for loading and saving sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session
    ///
    /// # Returns
    /// `None` if no session is stored under `key`
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError>;

    /// Save (create or replace) a session
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Delete a session
    ///
    /// Deleting a missing session is not an error.
    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError>;
}

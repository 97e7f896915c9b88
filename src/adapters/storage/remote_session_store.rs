//! Remote Session Store Adapter
//!
//! Talks to a REST document store keyed by user/session identifier:
//!
//! - `GET    {base}/{key}` returns the record, or 404 when absent
//! - `PUT    {base}/{key}` stores the JSON record
//! - `DELETE {base}/{key}` removes it (404 is fine)
//!
//! An optional bearer token is sent with every call. Calls are bounded by a
//! short timeout so a slow store cannot hold up a turn.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::SessionKey;
use crate::domain::intake::Session;
use crate::ports::{SessionStore, SessionStoreError};

/// Default per-call timeout for the remote store.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// REST document store client
pub struct RemoteSessionStore {
    client: Client,
    base_url: String,
    token: Option<Secret<String>>,
}

impl RemoteSessionStore {
    /// Creates a client for the collection at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SessionStoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionStoreError::Remote(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(Secret::new),
        })
    }

    fn document_url(&self, key: &SessionKey) -> String {
        format!("{}/{}", self.base_url, key.as_str())
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, SessionStoreError> {
        self.authorize(builder)
            .send()
            .await
            .map_err(|e| SessionStoreError::Remote(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for RemoteSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError> {
        let response = self.send(self.client.get(self.document_url(key))).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| SessionStoreError::Remote(e.to_string()))?;
                serde_json::from_str(&body)
                    .map(Some)
                    .map_err(|e| SessionStoreError::Deserialization(e.to_string()))
            }
            status => Err(SessionStoreError::Remote(format!("GET returned {}", status))),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let body = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        let response = self
            .send(
                self.client
                    .put(self.document_url(session.key()))
                    .header("Content-Type", "application/json")
                    .body(body),
            )
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SessionStoreError::Remote(format!(
                "PUT returned {}",
                response.status()
            )))
        }
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        let response = self.send(self.client.delete(self.document_url(key))).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(SessionStoreError::Remote(format!("DELETE returned {}", status))),
        }
    }
}

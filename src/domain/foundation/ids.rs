//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length of a session key.
pub const MAX_SESSION_KEY_LENGTH: usize = 128;

/// Opaque identifier for one user's intake conversation.
///
/// Keys are supplied by the caller (an authenticated user id, a browser
/// session id) or generated. They double as document names in the file
/// and remote stores, so only `[A-Za-z0-9_.@-]` is accepted and a key may
/// not start with a dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a validated session key.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        let trimmed = key.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_key"));
        }
        if trimmed.len() > MAX_SESSION_KEY_LENGTH {
            return Err(ValidationError::too_long(
                "session_key",
                MAX_SESSION_KEY_LENGTH,
                trimmed.len(),
            ));
        }
        if trimmed.starts_with('.') {
            return Err(ValidationError::invalid_format(
                "session_key",
                "must not start with '.'",
            ));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@')))
        {
            return Err(ValidationError::invalid_format(
                "session_key",
                format!("unsupported character '{}'", bad),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Generates a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

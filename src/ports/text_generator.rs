//! Text Generator Port - Interface for single-shot LLM completions.
//!
//! The intake flow composes one instruction per turn (persona, windowed
//! context, new input) and needs back a single block of text. Providers
//! that speak a richer protocol adapt to this narrow contract.
//!
//! # Errors
//!
//! Failures are returned as a tagged [`GenerationError`]. Callers match on
//! [`GenerationError::kind`] to pick the user-facing category; no provider
//! error type leaks past the adapter.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::intake::GenerationErrorKind;

/// Default output budget for a dialogue turn.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1200;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default bound on a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Port for text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for a single instruction.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Short provider name for logs (e.g. "groq", "mock").
    fn provider_name(&self) -> &str;
}

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Full instruction text sent as the user message.
    pub instruction: String,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// How long the call may take before it counts as a connectivity failure.
    pub timeout: Duration,
}

impl GenerationRequest {
    /// Creates a request with default budget, temperature and timeout.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Text generation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Could not reach the provider.
    #[error("connection failed: {0}")]
    Connectivity(String),

    /// The call did not finish in time.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Provider throttled the request.
    #[error("rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u32>,
    },

    /// API key missing, invalid or not allowed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider-side failure (5xx).
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Response arrived but could not be used.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity(message.into())
    }

    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    }

    pub fn rate_limited(message: impl Into<String>, retry_after_secs: Option<u32>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_secs,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// User-facing category. Timeouts count as connectivity failures.
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::Connectivity(_) | GenerationError::Timeout { .. } => {
                GenerationErrorKind::Connectivity
            }
            GenerationError::RateLimited { .. } => GenerationErrorKind::RateLimit,
            GenerationError::AuthenticationFailed(_) => GenerationErrorKind::Auth,
            GenerationError::Unavailable(_)
            | GenerationError::InvalidResponse(_)
            | GenerationError::Other(_) => GenerationErrorKind::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_overrides_defaults() {
        let request = GenerationRequest::new("Describe the process")
            .with_max_output_tokens(300)
            .with_temperature(0.2)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(request.instruction, "Describe the process");
        assert_eq!(request.max_output_tokens, 300);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn request_defaults() {
        let request = GenerationRequest::new("x");
        assert_eq!(request.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.timeout, DEFAULT_GENERATION_TIMEOUT);
    }

    #[test]
    fn error_kinds_are_classified() {
        assert_eq!(
            GenerationError::connectivity("refused").kind(),
            GenerationErrorKind::Connectivity
        );
        assert_eq!(
            GenerationError::timeout(Duration::from_secs(30)).kind(),
            GenerationErrorKind::Connectivity
        );
        assert_eq!(
            GenerationError::rate_limited("slow down", Some(10)).kind(),
            GenerationErrorKind::RateLimit
        );
        assert_eq!(
            GenerationError::authentication("bad key").kind(),
            GenerationErrorKind::Auth
        );
        assert_eq!(
            GenerationError::unavailable("503").kind(),
            GenerationErrorKind::Generic
        );
        assert_eq!(
            GenerationError::invalid_response("no choices").kind(),
            GenerationErrorKind::Generic
        );
        assert_eq!(GenerationError::other("?").kind(), GenerationErrorKind::Generic);
    }

    #[test]
    fn error_messages_display_correctly() {
        assert_eq!(
            GenerationError::timeout(Duration::from_secs(30)).to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            GenerationError::rate_limited("too many requests", None).to_string(),
            "rate limited: too many requests"
        );
        assert_eq!(
            GenerationError::authentication("invalid api key").to_string(),
            "authentication failed: invalid api key"
        );
    }
}

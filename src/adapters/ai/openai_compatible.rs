//! OpenAI-compatible generator - TextGenerator over `/chat/completions`.
//!
//! Works against any endpoint speaking the OpenAI chat-completions
//! protocol. Groq is the default backend; OpenAI itself only needs a
//! different base URL and model.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ChatCompletionsConfig::groq(api_key)
//!     .with_model("llama3-70b-8192");
//!
//! let generator = ChatCompletionsGenerator::new(config)?;
//! ```
//!
//! Each call is made once. Failures are classified into
//! [`GenerationError`] and never retried here.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Groq's OpenAI-compatible API root.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Groq model.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";

/// Configuration for a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Name used in logs.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// API root, without the trailing `/chat/completions`.
    pub base_url: String,
    /// Connection establishment timeout. Per-call timeouts come from the request.
    pub connect_timeout: Duration,
}

impl ChatCompletionsConfig {
    /// Groq defaults.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            provider: "groq".to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            base_url: GROQ_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// OpenAI defaults.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions client.
pub struct ChatCompletionsGenerator {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsGenerator {
    /// Creates a generator with its own HTTP client.
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GenerationError::other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.instruction.clone(),
            }],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerationError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .timeout(request.timeout)
            .json(&self.to_wire_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::timeout(request.timeout)
                } else if e.is_connect() {
                    GenerationError::connectivity(format!("Connection failed: {}", e))
                } else {
                    GenerationError::connectivity(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let header_retry = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();
        let message = Self::error_message(&error_body).unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            401 | 403 => Err(GenerationError::authentication(message)),
            429 => {
                let retry_after = header_retry.or_else(|| Self::parse_retry_after(&error_body));
                Err(GenerationError::rate_limited(message, retry_after))
            }
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, message
            ))),
            _ => Err(GenerationError::other(format!(
                "Unexpected status {}: {}",
                status, message
            ))),
        }
    }

    /// Extracts `error.message` from an OpenAI-style error body.
    fn error_message(error_body: &str) -> Option<String> {
        let parsed = serde_json::from_str::<serde_json::Value>(error_body).ok()?;
        parsed
            .get("error")?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }

    /// Parses "try again in Xs" out of a rate-limit error body.
    fn parse_retry_after(error_body: &str) -> Option<u32> {
        let message = Self::error_message(error_body)?;
        let idx = message.find("try again in ")?;
        let rest = &message[idx + "try again in ".len()..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    async fn parse_response(&self, response: Response) -> Result<String, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::invalid_response(format!("Failed to parse response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::invalid_response("No choices in response"))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if self.config.api_key().trim().is_empty() {
            return Err(GenerationError::authentication("API key is not configured"));
        }

        tracing::debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            max_tokens = request.max_output_tokens,
            temperature = request.temperature,
            "Sending chat completion request"
        );

        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_name(&self) -> &str {
        &self.config.provider
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

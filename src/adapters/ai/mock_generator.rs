//! Mock text generator for tests and offline runs.
//!
//! # Features
//!
//! - Scripted responses, consumed in order
//! - Error injection for each failure category
//! - Simulated latency for timeout testing
//! - Call recording for verification, bounded to the most recent calls
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("Which tool do you use for invoicing?")
//!     .with_error(MockError::RateLimited);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// Reply used once the script is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Thanks. Could you tell me more about how that works today?";

/// Requests kept for inspection; older ones are dropped.
pub const MAX_RECORDED_CALLS: usize = 64;

/// Mock text generator.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<VecDeque<GenerationRequest>>>,
}

/// A scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Failure categories the mock can simulate.
#[derive(Debug, Clone)]
pub enum MockError {
    Connectivity,
    Timeout,
    RateLimited,
    AuthenticationFailed,
    Unavailable,
    InvalidResponse,
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Connectivity => GenerationError::connectivity("connection refused"),
            MockError::Timeout => GenerationError::timeout(Duration::from_secs(30)),
            MockError::RateLimited => GenerationError::rate_limited("too many requests", Some(30)),
            MockError::AuthenticationFailed => GenerationError::authentication("invalid api key"),
            MockError::Unavailable => GenerationError::unavailable("service unavailable"),
            MockError::InvalidResponse => GenerationError::invalid_response("no choices in response"),
        }
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The most recent requests, oldest first.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).iter().cloned().collect()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_MOCK_REPLY.to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        {
            let mut calls = lock(&self.calls);
            if calls.len() == MAX_RECORDED_CALLS {
                calls.pop_front();
            }
            calls.push_back(request);
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::GenerationErrorKind;

    #[tokio::test]
    async fn returns_scripted_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        let a = generator.generate(GenerationRequest::new("a")).await.unwrap();
        let b = generator.generate(GenerationRequest::new("b")).await.unwrap();

        assert_eq!(a, "first");
        assert_eq!(b, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_reply() {
        let generator = MockTextGenerator::new();
        let reply = generator.generate(GenerationRequest::new("a")).await.unwrap();
        assert_eq!(reply, DEFAULT_MOCK_REPLY);
    }

    #[tokio::test]
    async fn injected_errors_keep_their_kind() {
        let generator = MockTextGenerator::new()
            .with_error(MockError::Connectivity)
            .with_error(MockError::RateLimited)
            .with_error(MockError::AuthenticationFailed)
            .with_error(MockError::Unavailable);

        let mut kinds = Vec::new();
        for _ in 0..4 {
            let err = generator.generate(GenerationRequest::new("x")).await.unwrap_err();
            kinds.push(err.kind());
        }

        assert_eq!(
            kinds,
            vec![
                GenerationErrorKind::Connectivity,
                GenerationErrorKind::RateLimit,
                GenerationErrorKind::Auth,
                GenerationErrorKind::Generic,
            ]
        );
    }

    #[tokio::test]
    async fn records_calls() {
        let generator = MockTextGenerator::new();
        generator
            .generate(GenerationRequest::new("hello").with_temperature(0.1))
            .await
            .unwrap();

        assert_eq!(generator.call_count(), 1);
        let calls = generator.get_calls();
        assert_eq!(calls[0].instruction, "hello");
        assert_eq!(calls[0].temperature, 0.1);
    }

    #[tokio::test]
    async fn recorded_calls_are_bounded() {
        let generator = MockTextGenerator::new();
        for i in 0..MAX_RECORDED_CALLS + 10 {
            generator
                .generate(GenerationRequest::new(format!("call {}", i)))
                .await
                .unwrap();
        }

        assert_eq!(generator.call_count(), MAX_RECORDED_CALLS);
        assert_eq!(generator.get_calls()[0].instruction, "call 10");
    }

    #[tokio::test]
    async fn clones_share_script_and_calls() {
        let generator = MockTextGenerator::new().with_response("shared");
        let clone = generator.clone();

        let reply = clone.generate(GenerationRequest::new("x")).await.unwrap();

        assert_eq!(reply, "shared");
        assert_eq!(generator.call_count(), 1);
    }
}

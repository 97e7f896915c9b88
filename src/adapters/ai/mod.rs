//! AI Adapters.
//!
//! Implementations of the generation ports.
//!
//! ## Available Adapters
//!
//! - `ChatCompletionsGenerator` - OpenAI-compatible chat completions (Groq, OpenAI)
//! - `MockTextGenerator` - Scripted generator for tests and offline runs
//! - `LlmReportGenerator` - Consulting report writer on top of any `TextGenerator`

mod llm_report_generator;
mod mock_generator;
mod openai_compatible;

pub use llm_report_generator::{LlmReportGenerator, ReportSettings};
pub use mock_generator::{MockError, MockResponse, MockTextGenerator, DEFAULT_MOCK_REPLY};
pub use openai_compatible::{
    ChatCompletionsConfig, ChatCompletionsGenerator, DEFAULT_GROQ_MODEL, GROQ_BASE_URL,
    OPENAI_BASE_URL,
};

//! ReportGenerator backed by any TextGenerator.
//!
//! The conversation is serialized to JSON, cut to a character budget and
//! appended to a fixed consulting-report instruction. One long-form
//! completion is requested with its own budget, temperature and timeout.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::text::{is_command, truncate_chars};
use crate::domain::intake::{prompts, Role, Style, TurnRecord};
use crate::ports::{
    GenerationError, GenerationRequest, ReportError, ReportGenerator, ReportRequest, TextGenerator,
};

/// Report generation tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Turns with this user text carry no information and are left out.
    pub start_phrase: String,
    /// Character budget for the serialized conversation.
    pub max_input_chars: usize,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            start_phrase: "start".to_string(),
            max_input_chars: 10_000,
            max_output_tokens: 3500,
            temperature: 0.5,
            timeout: Duration::from_secs(30),
        }
    }
}

/// LLM-backed report writer.
pub struct LlmReportGenerator {
    generator: Arc<dyn TextGenerator>,
    settings: ReportSettings,
}

impl LlmReportGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: ReportSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Serializes the informational part of the conversation, cut to budget.
    fn conversation_json(&self, request: &ReportRequest, turns: &[&TurnRecord]) -> Result<String, GenerationError> {
        let record = ConversationRecord {
            session_meta: ConversationMeta {
                key: request.session_key.as_str(),
                role: request.role,
                style: request.style,
            },
            history: turns,
        };

        let json = serde_json::to_string(&record)
            .map_err(|e| GenerationError::other(format!("Failed to serialize conversation: {}", e)))?;

        Ok(truncate_chars(&json, self.settings.max_input_chars))
    }
}

#[async_trait]
impl ReportGenerator for LlmReportGenerator {
    async fn generate(&self, request: ReportRequest) -> Result<String, ReportError> {
        let turns: Vec<&TurnRecord> = request
            .history
            .iter()
            .filter(|turn| !is_command(turn.user(), &self.settings.start_phrase))
            .collect();

        if turns.is_empty() {
            return Err(ReportError::NothingToReport);
        }

        let json = self.conversation_json(&request, &turns)?;
        let generation = GenerationRequest::new(prompts::report_prompt(&json))
            .with_max_output_tokens(self.settings.max_output_tokens)
            .with_temperature(self.settings.temperature)
            .with_timeout(self.settings.timeout);

        tracing::info!(
            session = %request.session_key,
            turns = turns.len(),
            input_chars = json.chars().count(),
            provider = self.generator.provider_name(),
            "Generating consulting report"
        );

        let report = self.generator.generate(generation).await?;
        Ok(report)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationRecord<'a> {
    session_meta: ConversationMeta<'a>,
    history: &'a [&'a TurnRecord],
}

#[derive(Serialize)]
struct ConversationMeta<'a> {
    key: &'a str,
    role: Role,
    style: Style,
}

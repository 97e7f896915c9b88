//! HandleTurnHandler - Process one user input against a session
//!
//! Control phrases are checked first: the start sentinel resets the
//! session to a greeting, the trigger phrase hands off to the report
//! trigger. Anything else is a dialogue turn: window the history, compose
//! the instruction, generate, evaluate completeness, append.
//!
//! Persistence is not done here; the caller saves the returned session.

use std::sync::Arc;
use std::time::Duration;

use super::outcome::{TurnKind, TurnOutcome};
use super::trigger_report::ReportTriggerHandler;
use crate::domain::foundation::text::{is_command, mentions, truncate_chars};
use crate::domain::intake::{
    failure_reply, persona_instructions, prompts, CompletenessEvaluator, ContextWindower,
    EvaluationScope, IntakePhase, IntakeSettings, Session, TurnRecord,
};
use crate::ports::{
    GenerationError, GenerationRequest, TextGenerator, DEFAULT_GENERATION_TIMEOUT,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};

/// Budget for dialogue generation calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationLimits {
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

/// Command to process one user input
#[derive(Debug, Clone)]
pub struct HandleTurnCommand {
    /// Non-empty user input; transports reject blank input beforehand.
    pub input: String,
    pub temperature: f32,
}

impl HandleTurnCommand {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Dialogue session controller
pub struct HandleTurnHandler {
    generator: Arc<dyn TextGenerator>,
    trigger: Arc<ReportTriggerHandler>,
    settings: Arc<IntakeSettings>,
    limits: GenerationLimits,
    windower: ContextWindower,
    evaluator: CompletenessEvaluator,
}

impl HandleTurnHandler {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        trigger: Arc<ReportTriggerHandler>,
        settings: Arc<IntakeSettings>,
        limits: GenerationLimits,
    ) -> Self {
        let windower = ContextWindower::new(settings.start_phrase.clone());
        let evaluator = CompletenessEvaluator::new(
            &settings.criteria,
            settings.min_criteria_hit,
            settings.min_turns,
        );

        Self {
            generator,
            trigger,
            settings,
            limits,
            windower,
            evaluator,
        }
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    /// Runs the report trigger directly, bypassing phrase detection.
    pub async fn trigger_report(&self, session: Session) -> TurnOutcome {
        self.trigger.trigger(session).await
    }

    pub async fn handle(&self, cmd: HandleTurnCommand, mut session: Session) -> TurnOutcome {
        // 1. Bound the input before anything else looks at it
        let input = truncate_chars(cmd.input.trim(), self.settings.max_input_chars);

        // 2. Start sentinel: fixed greeting, no generation
        if is_command(&input, &self.settings.start_phrase) {
            session.begin(TurnRecord::new(input, prompts::GREETING));
            tracing::info!(session = %session.key(), "Intake started");
            return TurnOutcome::new(prompts::GREETING, session, TurnKind::Greeting);
        }

        // 3. Trigger phrase: hand off to the report trigger
        if is_command(&input, &self.settings.trigger_phrase) {
            return self.trigger.trigger(session).await;
        }

        // 4. Evaluate completeness over the pre-update history
        let ready = self.evaluate(&session);

        // 5. Generate the reply
        let context = self.windower.build(
            session.history(),
            self.settings.max_context_turns,
            self.settings.max_chars_per_field,
        );
        let instruction = prompts::turn_prompt(
            &persona_instructions(session.role(), session.style()),
            &context,
            &input,
        );
        let request = GenerationRequest::new(instruction)
            .with_max_output_tokens(self.limits.max_output_tokens)
            .with_temperature(cmd.temperature)
            .with_timeout(self.limits.timeout);

        let generated = match self.generate(request).await {
            Ok(text) => text,
            Err(err) => {
                let kind = err.kind();
                tracing::warn!(
                    session = %session.key(),
                    provider = self.generator.provider_name(),
                    kind = ?kind,
                    error = %err,
                    "Generation failed; session left unchanged"
                );
                return TurnOutcome::new(
                    failure_reply(kind, &err.to_string()),
                    session,
                    TurnKind::Failed(kind),
                );
            }
        };

        // 6. Nudge once when ready, unless the reply already points at the trigger
        let mut reply = truncate_chars(generated.trim(), self.settings.max_reply_chars);
        let nudge = ready
            && session.phase() != IntakePhase::ReadyNudged
            && !mentions(&reply, &self.settings.trigger_phrase);
        if nudge {
            reply.push_str(&prompts::nudge_suffix(&self.settings.trigger_phrase));
        }

        // 7. Append the turn and enforce the retention cap
        session.record_turn(
            TurnRecord::new(input, reply.clone()),
            ready,
            self.settings.max_retained_turns,
        );

        tracing::debug!(
            session = %session.key(),
            turns = session.history().len(),
            ready,
            nudge,
            "Turn recorded"
        );

        let kind = if nudge { TurnKind::Nudged } else { TurnKind::Reply };
        TurnOutcome::new(reply, session, kind)
    }

    /// Completeness over the configured scope of the current history.
    fn evaluate(&self, session: &Session) -> bool {
        let max_turns = match self.settings.evaluation_scope {
            EvaluationScope::ContextWindow => self.settings.max_context_turns,
            EvaluationScope::FullHistory => usize::MAX,
        };
        let turns = self.windower.select(session.history(), max_turns);
        let ready = self.evaluator.evaluate(&turns);

        if ready {
            tracing::debug!(
                session = %session.key(),
                matched = ?self.evaluator.matched_criteria(&turns),
                "Completeness reached"
            );
        }
        ready
    }

    /// Calls the generator under the configured timeout.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let timeout = request.timeout;
        tokio::time::timeout(timeout, self.generator.generate(request))
            .await
            .unwrap_or_else(|_| Err(GenerationError::timeout(timeout)))
    }
}

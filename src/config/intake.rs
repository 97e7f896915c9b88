//! Intake engine configuration

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::intake::{EvaluationScope, IntakeSettings, ReportCompletion};

/// Dialogue and completeness tunables.
///
/// Every field falls back to the engine default, so an empty environment
/// yields [`IntakeSettings::default()`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub start_phrase: String,
    pub trigger_phrase: String,
    pub max_input_chars: usize,
    pub max_reply_chars: usize,
    pub max_context_turns: usize,
    pub max_chars_per_field: usize,
    pub max_retained_turns: usize,
    /// Comma-separated in the environment.
    pub criteria: Vec<String>,
    pub min_criteria_hit: usize,
    pub min_turns: usize,
    pub evaluation_scope: EvaluationScope,
    pub report_completion: ReportCompletion,
    /// Console transport writes generated reports here when set.
    pub report_output_dir: Option<PathBuf>,
}

impl IntakeConfig {
    /// Engine settings derived from this configuration
    pub fn settings(&self) -> IntakeSettings {
        IntakeSettings {
            start_phrase: self.start_phrase.trim().to_string(),
            trigger_phrase: self.trigger_phrase.trim().to_string(),
            max_input_chars: self.max_input_chars,
            max_reply_chars: self.max_reply_chars,
            max_context_turns: self.max_context_turns,
            max_chars_per_field: self.max_chars_per_field,
            max_retained_turns: self.max_retained_turns,
            criteria: self.criteria.clone(),
            min_criteria_hit: self.min_criteria_hit,
            min_turns: self.min_turns,
            evaluation_scope: self.evaluation_scope,
            report_completion: self.report_completion,
        }
    }

    fn distinct_criteria(&self) -> usize {
        self.criteria
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_phrase.trim().is_empty() {
            return Err(ValidationError::InvalidPhrase("intake.start_phrase"));
        }
        if self.trigger_phrase.trim().is_empty()
            || self.trigger_phrase.trim().eq_ignore_ascii_case(self.start_phrase.trim())
        {
            return Err(ValidationError::InvalidPhrase("intake.trigger_phrase"));
        }

        let limits = [
            (self.max_input_chars, "intake.max_input_chars"),
            (self.max_reply_chars, "intake.max_reply_chars"),
            (self.max_context_turns, "intake.max_context_turns"),
            (self.max_chars_per_field, "intake.max_chars_per_field"),
            (self.min_turns, "intake.min_turns"),
        ];
        if let Some((_, name)) = limits.iter().find(|(value, _)| *value == 0) {
            return Err(ValidationError::InvalidLimit(*name));
        }
        if self.max_retained_turns < self.max_context_turns {
            return Err(ValidationError::InvalidLimit("intake.max_retained_turns"));
        }
        if self.evaluation_scope == EvaluationScope::ContextWindow
            && self.min_turns > self.max_context_turns
        {
            return Err(ValidationError::InvalidLimit("intake.min_turns"));
        }

        if self.min_criteria_hit > self.distinct_criteria() {
            return Err(ValidationError::InvalidCriteria);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let settings = IntakeSettings::default();
        Self {
            start_phrase: settings.start_phrase,
            trigger_phrase: settings.trigger_phrase,
            max_input_chars: settings.max_input_chars,
            max_reply_chars: settings.max_reply_chars,
            max_context_turns: settings.max_context_turns,
            max_chars_per_field: settings.max_chars_per_field,
            max_retained_turns: settings.max_retained_turns,
            criteria: settings.criteria,
            min_criteria_hit: settings.min_criteria_hit,
            min_turns: settings.min_turns,
            evaluation_scope: settings.evaluation_scope,
            report_completion: settings.report_completion,
            report_output_dir: None,
        }
    }
}

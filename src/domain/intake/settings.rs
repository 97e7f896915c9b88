//! Tunables for the intake engine.
//!
//! Loaded once at startup (see `config::IntakeConfig`) and then shared
//! read-only by every session.

use serde::{Deserialize, Serialize};

/// Which turns the completeness evaluator looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationScope {
    /// The same window used to build the generation context.
    #[default]
    ContextWindow,
    /// Every retained non-sentinel turn.
    FullHistory,
}

/// What happens to a session once its report was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportCompletion {
    /// Drop the history so a new intake starts clean.
    #[default]
    ClearHistory,
    /// Keep the history and refuse a second report until a new turn arrives.
    MarkConsumed,
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSettings {
    pub start_phrase: String,
    pub trigger_phrase: String,
    pub max_input_chars: usize,
    pub max_reply_chars: usize,
    pub max_context_turns: usize,
    pub max_chars_per_field: usize,
    pub max_retained_turns: usize,
    pub criteria: Vec<String>,
    pub min_criteria_hit: usize,
    pub min_turns: usize,
    pub evaluation_scope: EvaluationScope,
    pub report_completion: ReportCompletion,
}

impl IntakeSettings {
    /// Default completeness keywords.
    pub fn default_criteria() -> Vec<String> {
        ["process", "tool", "problem", "inefficiency", "flow"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            start_phrase: "start".to_string(),
            trigger_phrase: "generate report".to_string(),
            max_input_chars: 500,
            max_reply_chars: 1500,
            max_context_turns: 4,
            max_chars_per_field: 300,
            max_retained_turns: 12,
            criteria: Self::default_criteria(),
            min_criteria_hit: 2,
            min_turns: 3,
            evaluation_scope: EvaluationScope::default(),
            report_completion: ReportCompletion::default(),
        }
    }
}

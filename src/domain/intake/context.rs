//! Bounded conversation context for generation requests.
//!
//! The windower picks the most recent informational turns and renders them
//! as labelled lines, so prompt size stays bounded no matter how long the
//! conversation runs.

use super::turn::TurnRecord;
use crate::domain::foundation::text::{is_command, truncate_chars};

/// Label prefixed to user lines.
pub const USER_LABEL: &str = "User";

/// Label prefixed to agent lines.
pub const AGENT_LABEL: &str = "Agent";

/// Selects and renders the recent part of a session history.
#[derive(Debug, Clone)]
pub struct ContextWindower {
    start_phrase: String,
}

impl ContextWindower {
    /// Creates a windower that ignores turns whose user text is `start_phrase`.
    pub fn new(start_phrase: impl Into<String>) -> Self {
        Self {
            start_phrase: start_phrase.into(),
        }
    }

    /// Returns the last `max_turns` non-sentinel turns, oldest first.
    pub fn select<'a>(&self, history: &'a [TurnRecord], max_turns: usize) -> Vec<&'a TurnRecord> {
        let informational: Vec<&TurnRecord> = history
            .iter()
            .filter(|turn| !is_command(turn.user(), &self.start_phrase))
            .collect();

        let skip = informational.len().saturating_sub(max_turns);
        informational.into_iter().skip(skip).collect()
    }

    /// Renders the selected window as `User: …` / `Agent: …` line pairs.
    ///
    /// Each field is cut to `max_chars_per_field` characters. An empty
    /// selection renders as an empty string.
    pub fn build(&self, history: &[TurnRecord], max_turns: usize, max_chars_per_field: usize) -> String {
        self.select(history, max_turns)
            .into_iter()
            .map(|turn| {
                format!(
                    "{}: {}\n{}: {}",
                    USER_LABEL,
                    truncate_chars(turn.user(), max_chars_per_field),
                    AGENT_LABEL,
                    truncate_chars(turn.agent(), max_chars_per_field),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Keyword heuristic deciding when enough has been said to write a report.
//!
//! This is a shallow signal, not language understanding: the user's text
//! is case-folded, concatenated, and scanned for criterion keywords. A
//! wrong answer only costs an extra or a missing nudge.

use std::collections::BTreeSet;

use super::turn::TurnRecord;

/// Completeness thresholds and keyword set.
#[derive(Debug, Clone)]
pub struct CompletenessEvaluator {
    criteria: Vec<String>,
    min_criteria_hit: usize,
    min_turns: usize,
}

impl CompletenessEvaluator {
    /// Creates an evaluator. Criteria are case-folded, blank ones dropped and
    /// duplicates merged.
    pub fn new(criteria: &[String], min_criteria_hit: usize, min_turns: usize) -> Self {
        let criteria: BTreeSet<String> = criteria
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            criteria: criteria.into_iter().collect(),
            min_criteria_hit,
            min_turns,
        }
    }

    /// True when at least `min_criteria_hit` distinct criteria appear in the
    /// users' text and at least `min_turns` turns are present.
    pub fn evaluate(&self, turns: &[&TurnRecord]) -> bool {
        if turns.len() < self.min_turns {
            return false;
        }
        self.matched_criteria(turns).len() >= self.min_criteria_hit
    }

    /// Criteria found anywhere in the users' text, in sorted order.
    pub fn matched_criteria(&self, turns: &[&TurnRecord]) -> Vec<&str> {
        let blob = turns
            .iter()
            .map(|turn| turn.user().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        self.criteria
            .iter()
            .filter(|criterion| blob.contains(criterion.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Stateless form of [`CompletenessEvaluator::evaluate`].
pub fn evaluate(
    history: &[TurnRecord],
    criteria: &[String],
    min_criteria_hit: usize,
    min_turns: usize,
) -> bool {
    let turns: Vec<&TurnRecord> = history.iter().collect();
    CompletenessEvaluator::new(criteria, min_criteria_hit, min_turns).evaluate(&turns)
}

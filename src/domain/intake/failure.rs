//! User-safe replies for failed generations.
//!
//! Raw provider errors never reach the user verbatim; only a short,
//! categorized line with a bounded excerpt of the detail.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::text::truncate_chars;

/// Maximum characters of provider detail echoed back to the user.
pub const MAX_FAILURE_DETAIL_CHARS: usize = 120;

/// Category of a generation failure, as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    Connectivity,
    RateLimit,
    Auth,
    Generic,
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationErrorKind::Connectivity => "connectivity",
            GenerationErrorKind::RateLimit => "rate_limit",
            GenerationErrorKind::Auth => "auth",
            GenerationErrorKind::Generic => "generic",
        };
        write!(f, "{}", s)
    }
}

/// Short reply for a failed dialogue turn.
pub fn failure_reply(kind: GenerationErrorKind, detail: &str) -> String {
    let label = match kind {
        GenerationErrorKind::Connectivity => "Connection error",
        GenerationErrorKind::RateLimit => "Rate limit reached",
        GenerationErrorKind::Auth => "Authentication error",
        GenerationErrorKind::Generic => "Unexpected error",
    };
    let detail = truncate_chars(detail.trim(), MAX_FAILURE_DETAIL_CHARS);

    if detail.is_empty() {
        format!("❌ {}", label)
    } else {
        format!("❌ {}: {}", label, detail)
    }
}

/// Reply for a failed report generation. The conversation is kept.
pub fn report_failure_reply(kind: GenerationErrorKind, detail: &str) -> String {
    format!(
        "{}\nThe report could not be generated. Your conversation was kept, so you can try again.",
        failure_reply(kind, detail)
    )
}

/// Reply when the trigger arrives before anything informational was said.
pub const NOTHING_TO_REPORT: &str = "There is nothing to report yet. Tell me a bit about your \
company and its processes first.";

/// Reply when the trigger repeats after a report was already produced.
pub const REPORT_ALREADY_GENERATED: &str = "The report for this conversation was already \
generated. Continue the conversation to add details, then ask again.";

//! Small text helpers shared by the intake engine and the adapters.
//!
//! All limits in this crate are counted in characters (Unicode scalar
//! values), never bytes, so truncation cannot split a code point.

/// Returns at most `max_chars` leading characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// True when `input`, trimmed and case-folded, equals `phrase` trimmed and case-folded.
pub fn is_command(input: &str, phrase: &str) -> bool {
    input.trim().to_lowercase() == phrase.trim().to_lowercase()
}

/// Case-insensitive substring check.
pub fn mentions(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        assert_eq!(truncate_chars("añejo", 2), "añ");
        assert_eq!(truncate_chars("💬💬💬", 1), "💬");
    }

    #[test]
    fn truncate_to_zero_is_empty() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn char_len_counts_scalars() {
        assert_eq!(char_len("técnico"), 7);
    }

    #[test]
    fn is_command_ignores_case_and_padding() {
        assert!(is_command("  Generate REPORT \n", "generate report"));
        assert!(is_command("START", "start"));
        assert!(!is_command("please generate report", "generate report"));
    }

    #[test]
    fn mentions_is_case_insensitive() {
        assert!(mentions("Type GENERATE REPORT when ready", "generate report"));
        assert!(!mentions("anything", ""));
    }
}

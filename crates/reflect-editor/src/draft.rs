//! Draft text operations.

/// Append a transcribed increment to the draft.
///
/// Inserts exactly one space separator when the existing draft is non-empty
/// after trimming; existing content is otherwise left untouched. A draft
/// that is only whitespace is replaced by the increment. The increment is
/// trimmed; an increment that trims to nothing leaves the draft unchanged.
pub fn append_transcript(draft: &str, increment: &str) -> String {
    let increment = increment.trim();
    if increment.is_empty() {
        return draft.to_string();
    }
    if draft.trim().is_empty() {
        increment.to_string()
    } else {
        format!("{} {}", draft, increment)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_empty_draft_inserts_no_separator() {
        assert_eq!(append_transcript("", "hello"), "hello");
    }

    #[test]
    fn test_append_to_nonempty_draft_inserts_one_space() {
        assert_eq!(append_transcript("hello", "world"), "hello world");
    }

    #[test]
    fn test_sequential_appends() {
        let draft = append_transcript("", "hello");
        assert_eq!(draft, "hello");
        let draft = append_transcript(&draft, "world");
        assert_eq!(draft, "hello world");
    }

    #[test]
    fn test_whitespace_only_draft_is_replaced() {
        assert_eq!(append_transcript("   \n", "hello"), "hello");
    }

    #[test]
    fn test_existing_content_is_not_altered() {
        // Trailing punctuation and internal spacing survive.
        assert_eq!(
            append_transcript("Today I learned.", "About lifetimes"),
            "Today I learned. About lifetimes"
        );
    }

    #[test]
    fn test_increment_is_trimmed() {
        assert_eq!(append_transcript("hello", "  world  "), "hello world");
    }

    #[test]
    fn test_empty_increment_leaves_draft_unchanged() {
        assert_eq!(append_transcript("hello", ""), "hello");
        assert_eq!(append_transcript("hello", "   "), "hello");
    }
}

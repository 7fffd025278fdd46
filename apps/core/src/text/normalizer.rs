//! Text normalization.
//!
//! Strips characters outside `[word, whitespace, . , ; : ! ? -]` and collapses
//! whitespace runs to a single space.

use regex::Regex;
use std::sync::LazyLock;

// NOTE: expect() is acceptable here, the patterns are constant
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,;:!?\-]").expect("Invalid regex: disallowed chars"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Normalize text into a single line.
///
/// Removal runs before collapsing so a stripped symbol between two spaces
/// cannot leave a double space behind.
pub fn normalize(text: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(text, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Normalize every line on its own and drop the ones left empty.
///
/// Heading detection works line by line, so newlines must survive.
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Graph\t\ttheory \n\n basics  "), "Graph theory basics");
    }

    #[test]
    fn test_strips_disallowed_characters() {
        assert_eq!(
            normalize("Unit 1: Intro (basics) & more @ home #2"),
            "Unit 1: Intro basics more home 2"
        );
    }

    #[test]
    fn test_keeps_allowed_punctuation() {
        assert_eq!(normalize("Wait, what? Yes; no: ok! self-study."), "Wait, what? Yes; no: ok! self-study.");
    }

    #[test]
    fn test_no_double_spaces() {
        let out = normalize("a @ b $$ c");
        assert!(!out.contains("  "));
        assert_eq!(out, "a b c");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_normalize_lines_keeps_structure() {
        let text = "Unit 1: Intro\n\n   Basics   of X\n\t\nUnit 2: Advanced";
        assert_eq!(normalize_lines(text), "Unit 1: Intro\nBasics of X\nUnit 2: Advanced");
    }
}

//! Claim pattern table.
//!
//! Each pattern recognizes one category of lifecycle claim in agent output.
//! The table is ordered: detection reports matches in definition order, one
//! match per pattern at most. Adding a category means adding a table entry,
//! never touching detector control flow.

use lazy_static::lazy_static;
use regex::Regex;

/// A single independent claim matcher.
#[derive(Debug)]
pub struct ClaimPattern {
    /// Category label (e.g. "context_reset")
    pub category: &'static str,
    regex: Regex,
}

impl ClaimPattern {
    fn new(category: &'static str, pattern: &str) -> Self {
        Self {
            category,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// First matched span in `text`, if any.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }
}

lazy_static! {
    /// Ordered claim categories checked against every agent response.
    pub static ref CLAIM_PATTERNS: Vec<ClaimPattern> = vec![
        ClaimPattern::new("context_reset", r"(?i)context\s+(?:has\s+been\s+)?reset"),
        ClaimPattern::new("new_session", r"(?i)new\s+session\s+(?:started|created)"),
        ClaimPattern::new("history_clear", r"(?i)cleared?\s+(?:context|history|buffer)"),
        ClaimPattern::new("fresh_start", r"(?i)fresh\s+(?:start|session|context)"),
        ClaimPattern::new("token_count", r"(?i)tokens?\s+\d+\s*/\s*\d+"),
        ClaimPattern::new("context_window", r"(?i)context\s+window\s+is\s+now"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(category: &str) -> &'static ClaimPattern {
        CLAIM_PATTERNS
            .iter()
            .find(|p| p.category == category)
            .unwrap()
    }

    #[test]
    fn test_context_reset_phrasings() {
        let p = pattern("context_reset");
        assert_eq!(p.first_match("The context reset just now."), Some("context reset"));
        assert_eq!(
            p.first_match("My context has been reset."),
            Some("context has been reset")
        );
        assert_eq!(p.first_match("CONTEXT RESET"), Some("CONTEXT RESET"));
        assert!(p.first_match("the context persists").is_none());
    }

    #[test]
    fn test_new_session_phrasings() {
        let p = pattern("new_session");
        assert!(p.first_match("A new session started.").is_some());
        assert!(p.first_match("new session created for you").is_some());
        assert!(p.first_match("a new session might help").is_none());
    }

    #[test]
    fn test_history_clear_phrasings() {
        let p = pattern("history_clear");
        assert!(p.first_match("I cleared history as requested").is_some());
        assert!(p.first_match("clear buffer complete").is_some());
        assert!(p.first_match("the history is long").is_none());
    }

    #[test]
    fn test_token_count_phrasings() {
        let p = pattern("token_count");
        assert_eq!(
            p.first_match("Usage: tokens 5000 / 128000 so far"),
            Some("tokens 5000 / 128000")
        );
        assert!(p.first_match("token 1/2").is_some());
        assert!(p.first_match("tokens are cheap").is_none());
    }

    #[test]
    fn test_first_match_only() {
        let p = pattern("fresh_start");
        assert_eq!(
            p.first_match("A fresh start, then another fresh start."),
            Some("fresh start")
        );
    }

    #[test]
    fn test_table_order_is_fixed() {
        let categories: Vec<&str> = CLAIM_PATTERNS.iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![
                "context_reset",
                "new_session",
                "history_clear",
                "fresh_start",
                "token_count",
                "context_window",
            ]
        );
    }
}

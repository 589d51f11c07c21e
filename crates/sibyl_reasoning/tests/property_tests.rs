//! Property tests for the extraction and formatting heuristics.
//!
//! These components are totals: whatever text comes in, they must return
//! without panicking and keep their output invariants.

use proptest::prelude::*;
use sibyl_reasoning::extract::{extract_location, extract_search_term};
use sibyl_reasoning::formatter::split_sections;
use sibyl_reasoning::planner::parse_plan;

proptest! {
    #[test]
    fn extract_location_never_panics(query in ".{0,200}") {
        let _ = extract_location(&query);
    }

    #[test]
    fn extract_location_output_is_trimmed(query in ".{0,200}") {
        if let Some(location) = extract_location(&query) {
            prop_assert_eq!(location.trim(), location.as_str());
            prop_assert!(!location.is_empty());
        }
    }

    #[test]
    fn extract_search_term_never_panics(query in ".{0,200}") {
        let _ = extract_search_term(&query);
    }

    #[test]
    fn extract_search_term_alphanumeric_input_is_nonempty(
        query in "[a-zA-Z0-9 ]{1,80}"
    ) {
        prop_assume!(query.trim().len() > 0);
        // Inputs with at least one non-stop-word token must yield something.
        let term = extract_search_term(&query);
        if query.split_whitespace().count() > 0 {
            // The 50-char prefix fallback guarantees non-empty output for
            // any input that survives punctuation cleaning.
            prop_assert!(!term.is_empty());
        }
    }

    #[test]
    fn split_sections_never_panics(raw in ".{0,400}") {
        let (_reasoning, _answer) = split_sections(&raw);
    }

    #[test]
    fn split_sections_recovers_authored_sections(
        reasoning in "[a-zA-Z ]{1,40}",
        answer in "[a-zA-Z ]{1,40}"
    ) {
        prop_assume!(reasoning.trim().len() > 0 && answer.trim().len() > 0);
        let raw = format!("REASONING: {}\nANSWER: {}", reasoning, answer);
        let (got_reasoning, got_answer) = split_sections(&raw);
        prop_assert_eq!(got_reasoning, reasoning.trim().to_string());
        prop_assert_eq!(got_answer, answer.trim().to_string());
    }

    #[test]
    fn parse_plan_never_panics(raw in ".{0,400}") {
        let _ = parse_plan(&raw);
    }
}

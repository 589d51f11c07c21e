//! Splits semi-structured LLM output into its reasoning and answer
//! sections. Layered degrade-gracefully parser: marker regexes, then
//! literal marker split, then sentence heuristics. Total — always returns
//! two strings (possibly one empty).

use regex::Regex;
use std::sync::LazyLock;

/// Both markers in their contract order, reasoning first. Case-insensitive,
/// dot matches newlines.
static RE_SECTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)REASONING:\s*(.*?)\s*ANSWER:\s*(.*)").unwrap());

/// Stock reasoning line used when the reply carries no recognizable
/// structure at all.
const UNSTRUCTURED_REASONING: &str =
    "I processed your query using available tools and knowledge.";

/// Split raw model output into `(reasoning, answer)`.
pub fn split_sections(raw: &str) -> (String, String) {
    // Tier 1: both section markers found by regex.
    if let Some(caps) = RE_SECTIONS.captures(raw) {
        return (caps[1].trim().to_string(), caps[2].trim().to_string());
    }

    // Tier 2: literal marker split.
    for marker in ["ANSWER:", "Answer:"] {
        if let Some((head, tail)) = raw.split_once(marker) {
            let reasoning = head
                .replace("REASONING:", "")
                .replace("Reasoning:", "")
                .trim()
                .to_string();
            return (reasoning, tail.trim().to_string());
        }
    }

    // Tier 3: sentence heuristics. First two sentences become the
    // reasoning, the remainder the answer; a single sentence is all answer.
    let sentences: Vec<&str> = raw
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.len() > 1 {
        let reasoning = format!("{}.", sentences[..2].join(". "));
        let answer = sentences[2..].join(". ");
        (reasoning, answer)
    } else {
        (UNSTRUCTURED_REASONING.to_string(), raw.trim().to_string())
    }
}

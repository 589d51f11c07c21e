//! Best-effort argument extraction from free query text.
//!
//! Both extractors are total: they never fail, at worst they return "no
//! match" (location) or a degraded guess (search term). Each is an ordered
//! rule cascade — the rule lists are data, evaluated in sequence, and the
//! first match wins. The ordering is significant: do not reorder.

use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Pre-compiled rule cascades (compiled once, reused across all calls)
// ============================================================================

/// Location patterns, most specific first. Each captures the trailing
/// location phrase in group 1. Applied to the lowercased query.
static LOCATION_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"weather in (.+?)(?:\?|$| today| now)",
        r"temperature in (.+?)(?:\?|$| today)",
        r"forecast for (.+?)(?:\?|$| today)",
        r"how.*weather.*in (.+?)(?:\?|$)",
        r"what.*weather.*in (.+?)(?:\?|$)",
        r"weather.*like.*in (.+?)(?:\?|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Trailing temporal words stripped from a captured location span.
/// "right now" must come before "now" in the alternation.
static RE_TEMPORAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:today|right now|now|like)\b").unwrap());

/// Question patterns for the encyclopedia search term. Each captures the
/// object of the question in group 1, with a leading article dropped.
static SEARCH_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"who (?:is|was|invented|created|discovered) (?:the |a |an )?(.+)",
        r"what is (?:the |a |an )?(.+)",
        r"tell me about (?:the |a |an )?(.+)",
        r"explain (?:the |a |an )?(.+)",
        r"when was (?:the |a |an )?(.+)",
        r"history of (?:the |a |an )?(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Question words, articles and auxiliaries removed before the main-words
/// fallback joins what survives.
const STOP_WORDS: &[&str] = &[
    "who", "what", "when", "where", "why", "how", "which", "tell", "me", "about", "explain",
    "the", "a", "an", "is", "was", "are", "were", "did", "do", "does",
];

// ============================================================================
// Location
// ============================================================================

/// Extract a candidate location for the weather tool, or `None`.
///
/// Pattern cascade first; then a token scan for a preposition followed by a
/// capitalized word as a last-resort guess.
pub fn extract_location(query: &str) -> Option<String> {
    let lowered = query.to_lowercase();

    for rule in LOCATION_RULES.iter() {
        if let Some(caps) = rule.captures(&lowered) {
            let span = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let cleaned = RE_TEMPORAL.replace_all(span, "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                return Some(title_case(cleaned));
            }
        }
    }

    // Fallback: "in/at/for <Capitalized>" over the original casing.
    let words: Vec<&str> = query.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        if !matches!(word.to_lowercase().as_str(), "in" | "at" | "for") {
            continue;
        }
        if let Some(next) = words.get(i + 1) {
            let candidate = next.trim_end_matches(['?', '.', '!', ',', '"']);
            if candidate.chars().next().is_some_and(|c| c.is_uppercase()) {
                return Some(candidate.to_string());
            }
        }
    }

    None
}

// ============================================================================
// Search term
// ============================================================================

/// Extract a usable encyclopedia search phrase. Total: always returns a
/// deterministic string (empty only for effectively empty input).
pub fn extract_search_term(query: &str) -> String {
    let cleaned = query.trim().trim_matches(['?', '.', '!']);
    let lowered = cleaned.to_lowercase();

    for rule in SEARCH_RULES.iter() {
        if let Some(caps) = rule.captures(&lowered) {
            let term = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            if !term.is_empty() {
                return title_case(term);
            }
        }
    }

    // No pattern matched: drop stop words and keep the first few main words.
    let main_words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| {
            let w = w.to_lowercase();
            !STOP_WORDS.contains(&w.trim_end_matches(['?', '.', '!', ',']))
        })
        .collect();
    if !main_words.is_empty() {
        let take = main_words.len().min(4);
        return title_case(&main_words[..take].join(" "));
    }

    // Degenerate input: first 50 chars of the cleaned query.
    let prefix: String = cleaned.chars().take(50).collect();
    title_case(prefix.trim())
}

/// Capitalize the first letter of each word, lowercasing the rest.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

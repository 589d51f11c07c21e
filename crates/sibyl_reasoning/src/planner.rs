//! Query classification: LLM-driven planning with a keyword fallback.
//!
//! The model may wrap its JSON plan in prose, so recovery is laddered:
//! first balanced `{...}` span, then the whole reply, then a typed failure
//! the orchestrator converts into the keyword plan.

use crate::llm::{CompletionParams, LlmClient};
use crate::prompts;
use sibyl_core::Plan;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("classification call failed: {0}")]
    Llm(anyhow::Error),
    #[error("no JSON object found in model output")]
    NoJson,
    #[error("model output was not a valid plan: {0}")]
    BadJson(#[from] serde_json::Error),
}

/// Case-insensitive substring indicators for the keyword fallback.
const WEATHER_KEYWORDS: &[&str] = &[
    "weather", "temperature", "forecast", "rain", "snow", "cloud", "humid", "°c", "°f", "degrees",
];
const WIKIPEDIA_KEYWORDS: &[&str] = &[
    "who",
    "what is",
    "when was",
    "history of",
    "invented",
    "discovered",
    "tell me about",
    "explain",
    "biography",
];

/// Ask the LLM to classify the query into a tool-usage plan.
pub async fn classify(client: &dyn LlmClient, query: &str) -> Result<Plan, PlanError> {
    let raw = client
        .complete(
            prompts::CLASSIFY_SYSTEM,
            &format!("User query: {}", query),
            CompletionParams {
                max_tokens: 512,
                temperature: 0.1,
            },
        )
        .await
        .map_err(PlanError::Llm)?;
    parse_plan(&raw)
}

/// Recover a plan object embedded anywhere in model output.
pub fn parse_plan(raw: &str) -> Result<Plan, PlanError> {
    if let Some(span) = first_balanced_object(raw) {
        if let Ok(plan) = serde_json::from_str::<Plan>(span) {
            return Ok(plan);
        }
    }
    if !raw.contains('{') {
        return Err(PlanError::NoJson);
    }
    Ok(serde_json::from_str(raw.trim())?)
}

/// Fallback analysis used whenever classification fails: a fixed
/// case-insensitive substring match against the two keyword sets. A query
/// may trigger both tools, either, or neither.
pub fn keyword_plan(query: &str) -> Plan {
    let lowered = query.to_lowercase();
    Plan {
        needs_weather: WEATHER_KEYWORDS.iter().any(|k| lowered.contains(k)),
        needs_wikipedia: WIKIPEDIA_KEYWORDS.iter().any(|k| lowered.contains(k)),
        reasoning: "Keyword-based analysis (language model unavailable)".to_string(),
    }
}

/// Find the first balanced `{...}` span, respecting JSON string literals.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

//! Shared wire types: the plan, the per-tool result records, and the
//! final answer returned to the caller.

use serde::{Deserialize, Serialize};

// ============================================================================
// Plan
// ============================================================================

/// The tool-usage decision produced once per query, either by the LLM
/// classifier or by the keyword fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub needs_weather: bool,
    pub needs_wikipedia: bool,
    pub reasoning: String,
}

// ============================================================================
// Tool reports
// ============================================================================

/// A normalized tool result: either the tool-specific success record or an
/// `{ "error": "..." }` object. The literal `error` key is the wire-level
/// success/failure discriminator consumed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolReport<T> {
    Ok(T),
    Err { error: String },
}

impl<T> ToolReport<T> {
    pub fn err(message: impl Into<String>) -> Self {
        ToolReport::Err {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolReport::Err { .. })
    }

    /// The success record, if this report holds one.
    pub fn ok(&self) -> Option<&T> {
        match self {
            ToolReport::Ok(value) => Some(value),
            ToolReport::Err { .. } => None,
        }
    }
}

/// Normalized current-weather record (metric units).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    /// Temperature in °C.
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Normalized encyclopedia summary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiSummary {
    pub title: String,
    pub summary: String,
    pub url: String,
}

// ============================================================================
// ExternalData
// ============================================================================

/// Everything the execute stage gathered for one query. Keys are additive
/// within a run; a tool slot never holds both a success and an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<ToolReport<WeatherReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<ToolReport<WikiSummary>>,
    /// Set when no location could be extracted for a weather-flagged query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_error: Option<String>,
    /// Set when no search term could be extracted for a wikipedia-flagged query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia_error: Option<String>,
    /// Unexpected execute-stage fault (tool task failed to join).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl ExternalData {
    pub fn weather_ok(&self) -> Option<&WeatherReport> {
        self.weather.as_ref().and_then(|r| r.ok())
    }

    pub fn wikipedia_ok(&self) -> Option<&WikiSummary> {
        self.wikipedia.as_ref().and_then(|r| r.ok())
    }

    /// True if any tool produced a success record.
    pub fn has_data(&self) -> bool {
        self.weather_ok().is_some() || self.wikipedia_ok().is_some()
    }
}

// ============================================================================
// FinalResult
// ============================================================================

/// The only value returned to the caller. `answer` is never empty: degenerate
/// LLM output is replaced by the deterministic fallback before it gets here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResult {
    pub reasoning: String,
    pub answer: String,
}

//! The reasoning orchestrator: plan → execute → synthesize.
//!
//! `process()` never fails to the caller. Every internal fault degrades to
//! the next tier down: LLM classification falls back to keyword analysis,
//! a tool failure stays in its own slot, and LLM synthesis falls back to a
//! deterministic answer assembled from whatever data survived.

use crate::extract;
use crate::formatter;
use crate::llm::{CompletionParams, LlmClient};
use crate::planner;
use crate::prompts;
use crate::throttle::Throttle;
use anyhow::Result;
use sibyl_core::{ExternalData, FinalResult, Plan, SibylConfig};
use sibyl_tools::{WeatherTool, WikipediaTool};

pub struct Orchestrator {
    client: Box<dyn LlmClient>,
    throttle: Throttle,
    weather: WeatherTool,
    wikipedia: WikipediaTool,
    params: CompletionParams,
}

impl Orchestrator {
    pub fn new(client: Box<dyn LlmClient>, config: &SibylConfig) -> Result<Self> {
        Ok(Self {
            client,
            throttle: Throttle::new(&config.throttle),
            weather: WeatherTool::new(&config.weather)?,
            wikipedia: WikipediaTool::new(&config.wikipedia)?,
            params: CompletionParams {
                max_tokens: config.llm.max_tokens,
                temperature: config.llm.temperature,
            },
        })
    }

    /// Process one query through the full pipeline.
    pub async fn process(&self, query: &str) -> FinalResult {
        let plan = self.plan(query).await;
        tracing::info!(
            needs_weather = plan.needs_weather,
            needs_wikipedia = plan.needs_wikipedia,
            "Plan ready"
        );

        let data = self.execute(&plan, query).await;
        self.synthesize_or_fallback(query, &plan, &data).await
    }

    /// Stage 1: LLM classification, keyword fallback on any failure.
    async fn plan(&self, query: &str) -> Plan {
        self.throttle.acquire().await;
        match planner::classify(self.client.as_ref(), query).await {
            Ok(plan) => {
                self.throttle.report(true).await;
                plan
            }
            Err(e) => {
                self.throttle.report(false).await;
                tracing::warn!("Classification failed, using keyword fallback: {}", e);
                planner::keyword_plan(query)
            }
        }
    }

    /// Stage 2: run the planned tools. The two lookups are spawned as
    /// independent tasks: one tool's failure never blocks or poisons the
    /// other. A task that fails to join is recorded under `errors` and the
    /// run continues with partial data.
    async fn execute(&self, plan: &Plan, query: &str) -> ExternalData {
        let mut data = ExternalData::default();
        let mut faults: Vec<String> = Vec::new();

        let weather_handle = if plan.needs_weather {
            match extract::extract_location(query) {
                Some(location) => {
                    tracing::info!("Fetching weather for '{}'", location);
                    let tool = self.weather.clone();
                    Some(tokio::spawn(async move { tool.fetch(&location).await }))
                }
                None => {
                    tracing::warn!("No location extractable from query");
                    data.weather_error =
                        Some("Could not extract a location from the query".to_string());
                    None
                }
            }
        } else {
            None
        };

        let wikipedia_handle = if plan.needs_wikipedia {
            let term = extract::extract_search_term(query);
            if term.is_empty() {
                tracing::warn!("No search term extractable from query");
                data.wikipedia_error =
                    Some("Could not extract a search term from the query".to_string());
                None
            } else {
                tracing::info!("Fetching encyclopedia summary for '{}'", term);
                let tool = self.wikipedia.clone();
                Some(tokio::spawn(async move { tool.lookup(&term).await }))
            }
        } else {
            None
        };

        if let Some(handle) = weather_handle {
            match handle.await {
                Ok(report) => data.weather = Some(report),
                Err(e) => faults.push(format!("weather task failed: {}", e)),
            }
        }
        if let Some(handle) = wikipedia_handle {
            match handle.await {
                Ok(report) => data.wikipedia = Some(report),
                Err(e) => faults.push(format!("wikipedia task failed: {}", e)),
            }
        }

        if !faults.is_empty() {
            tracing::error!("Execute stage fault: {}", faults.join("; "));
            data.errors = Some(faults.join("; "));
        }
        data
    }

    /// Stage 3: LLM synthesis, deterministic fallback on any failure.
    async fn synthesize_or_fallback(
        &self,
        query: &str,
        plan: &Plan,
        data: &ExternalData,
    ) -> FinalResult {
        self.throttle.acquire().await;
        match self.synthesize(query, plan, data).await {
            Ok(result) => {
                self.throttle.report(true).await;
                result
            }
            Err(e) => {
                self.throttle.report(false).await;
                tracing::warn!("Synthesis failed, using deterministic fallback: {}", e);
                fallback_result(query, data)
            }
        }
    }

    async fn synthesize(
        &self,
        query: &str,
        plan: &Plan,
        data: &ExternalData,
    ) -> Result<FinalResult> {
        let user_prompt = format!(
            "User query: {}\n\nMy analysis: {}\n\nExternal data:\n{}\n\nProvide your reasoning and final answer in the required format.",
            query,
            if plan.reasoning.is_empty() {
                "No specific analysis"
            } else {
                plan.reasoning.as_str()
            },
            success_digest(data),
        );

        let raw = self
            .client
            .complete(prompts::SYNTHESIZE_SYSTEM, &user_prompt, self.params.clone())
            .await?;

        let (reasoning, answer) = formatter::split_sections(&raw);
        if answer.trim().is_empty() {
            anyhow::bail!("model reply had no answer section");
        }
        Ok(FinalResult { reasoning, answer })
    }
}

/// Digest of successful external results only — error entries never reach
/// the synthesis prompt.
fn success_digest(data: &ExternalData) -> String {
    let mut parts = Vec::new();
    if let Some(weather) = data.weather_ok() {
        parts.push(format!(
            "Weather data: {}, {}, {}°C, humidity {}%, wind {} m/s",
            weather.location,
            weather.description,
            weather.temperature,
            weather.humidity,
            weather.wind_speed
        ));
    }
    if let Some(wiki) = data.wikipedia_ok() {
        parts.push(format!("Wikipedia summary ({}): {}", wiki.title, wiki.summary));
    }
    if parts.is_empty() {
        "No external data available".to_string()
    } else {
        parts.join("\n")
    }
}

/// Deterministic answer used when LLM synthesis fails.
///
/// One uniform composition rule: every available success is included,
/// weather first, joined with " | ". With no successes the answer echoes
/// the query — and never contains the word "error".
pub fn fallback_result(query: &str, data: &ExternalData) -> FinalResult {
    let mut parts = Vec::new();
    if let Some(weather) = data.weather_ok() {
        parts.push(format!(
            "Weather in {}: {}, {}°C",
            weather.location, weather.description, weather.temperature
        ));
    }
    if let Some(wiki) = data.wikipedia_ok() {
        parts.push(format!("Wikipedia: {}", wiki.summary));
    }

    let answer = if parts.is_empty() {
        format!("I understand you're asking about: {}", query)
    } else {
        parts.join(" | ")
    };

    FinalResult {
        reasoning: "Processed in degraded mode without the language model".to_string(),
        answer,
    }
}

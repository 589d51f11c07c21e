//! Encyclopedia-summary adapter (Wikipedia).
//!
//! Two-step lookup: the free-text phrase is first resolved to a canonical
//! page title via the opensearch endpoint (much better hit rate than
//! guessing the title directly), then the REST summary is fetched. If
//! resolution fails the raw phrase is used as the title.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use sibyl_core::config::WikipediaConfig;
use sibyl_core::{ToolReport, WikiSummary};
use std::time::Duration;

const USER_AGENT: &str = concat!("sibyl/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WikipediaTool {
    client: Client,
    rest_base_url: String,
    search_base_url: String,
}

impl WikipediaTool {
    pub fn new(config: &WikipediaConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(USER_AGENT)
                .build()?,
            rest_base_url: config.rest_base_url.trim_end_matches('/').to_string(),
            search_base_url: config.search_base_url.clone(),
        })
    }

    /// Look up an encyclopedic summary for a search phrase. Never fails:
    /// every fault becomes an error report in this tool's slot.
    pub async fn lookup(&self, phrase: &str) -> ToolReport<WikiSummary> {
        let title = match self.resolve_title(phrase).await {
            Ok(Some(title)) => title,
            Ok(None) => phrase.to_string(),
            Err(e) => {
                tracing::debug!("Title resolution for '{}' failed: {:#}", phrase, e);
                phrase.to_string()
            }
        };

        match self.fetch_summary(&title).await {
            Ok(summary) => ToolReport::Ok(summary),
            Err(e) => {
                tracing::warn!("Wikipedia lookup for '{}' failed: {:#}", phrase, e);
                ToolReport::err(format!("Wikipedia API call failed: {:#}", e))
            }
        }
    }

    /// Resolve a phrase to the closest canonical page title, if any.
    async fn resolve_title(&self, phrase: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.search_base_url)
            .query(&[
                ("action", "opensearch"),
                ("search", phrase),
                ("limit", "1"),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to reach wikipedia search API")?;

        if !response.status().is_success() {
            anyhow::bail!("Wikipedia search error: {}", response.status().as_u16());
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse opensearch response")?;
        Ok(first_search_hit(&payload))
    }

    async fn fetch_summary(&self, title: &str) -> Result<WikiSummary> {
        let slug = title.replace(' ', "_");
        let url = format!("{}/{}", self.rest_base_url, slug);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach wikipedia summary API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Wikipedia API error: {}", status.as_u16());
        }

        let payload: SummaryResponse = response
            .json()
            .await
            .context("Failed to parse wikipedia summary response")?;
        Ok(normalize(payload, title))
    }
}

/// Opensearch replies with `[query, [titles], [descriptions], [urls]]`.
fn first_search_hit(payload: &serde_json::Value) -> Option<String> {
    payload
        .get(1)?
        .get(0)?
        .as_str()
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn normalize(payload: SummaryResponse, requested_title: &str) -> WikiSummary {
    WikiSummary {
        title: payload.title.unwrap_or_else(|| requested_title.to_string()),
        summary: payload
            .extract
            .unwrap_or_else(|| "No summary available.".to_string()),
        url: payload
            .content_urls
            .and_then(|urls| urls.desktop)
            .map(|d| d.page)
            .unwrap_or_default(),
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: Option<String>,
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<DesktopUrls>,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    page: String,
}

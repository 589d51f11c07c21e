//! Current-weather adapter (OpenWeatherMap).
//!
//! Maps a location string to a normalized `ToolReport<WeatherReport>`.
//! Never returns a transport error to the caller: every fault becomes an
//! error report in the tool's own slot.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use sibyl_core::config::WeatherConfig;
use sibyl_core::{ToolReport, WeatherReport};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WeatherTool {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherTool {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch current weather for a location.
    ///
    /// A missing API key degrades this adapter to a permanent error report.
    pub async fn fetch(&self, location: &str) -> ToolReport<WeatherReport> {
        let Some(api_key) = self.api_key.as_deref() else {
            return ToolReport::err("OpenWeather API key not configured");
        };

        match self.fetch_inner(location, api_key).await {
            Ok(report) => ToolReport::Ok(report),
            Err(e) => {
                tracing::warn!("Weather lookup for '{}' failed: {:#}", location, e);
                ToolReport::err(format!("Weather API call failed: {:#}", e))
            }
        }
    }

    async fn fetch_inner(&self, location: &str, api_key: &str) -> Result<WeatherReport> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .context("Failed to reach weather API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Weather API error: {}", status.as_u16());
        }

        let payload: OwmResponse = response
            .json()
            .await
            .context("Failed to parse weather API response")?;
        normalize(payload)
    }
}

fn normalize(payload: OwmResponse) -> Result<WeatherReport> {
    let condition = payload
        .weather
        .into_iter()
        .next()
        .context("Weather API response had no condition entry")?;
    Ok(WeatherReport {
        location: payload.name,
        temperature: payload.main.temp,
        description: condition.description,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
    })
}

// OpenWeatherMap current-weather payload, reduced to the fields we keep.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "Paris",
        "main": {"temp": 18.3, "humidity": 62, "pressure": 1014},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds"}],
        "wind": {"speed": 4.1, "deg": 230}
    }"#;

    #[test]
    fn test_normalize_keeps_expected_fields() {
        let payload: OwmResponse = serde_json::from_str(FIXTURE).unwrap();
        let report = normalize(payload).unwrap();
        assert_eq!(report.location, "Paris");
        assert!((report.temperature - 18.3).abs() < 1e-9);
        assert_eq!(report.description, "scattered clouds");
        assert_eq!(report.humidity, 62);
        assert!((report.wind_speed - 4.1).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_rejects_empty_condition_list() {
        let payload: OwmResponse = serde_json::from_str(
            r#"{"name": "Paris", "main": {"temp": 1.0, "humidity": 50}, "weather": [], "wind": {"speed": 0.0}}"#,
        )
        .unwrap();
        assert!(normalize(payload).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_is_permanent_error_report() {
        let tool = WeatherTool::new(&WeatherConfig::default()).unwrap();
        let report = tool.fetch("Paris").await;
        assert!(report.is_error());
        if let ToolReport::Err { error } = report {
            assert!(error.contains("not configured"));
        }
    }
}

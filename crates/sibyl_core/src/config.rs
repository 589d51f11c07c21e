use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SibylConfig {
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
    pub wikipedia: WikipediaConfig,
    pub throttle: ThrottleConfig,
    pub server: ServerConfig,
}

impl SibylConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SibylConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GEMINI_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("GEMINI_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("GEMINI_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("OPENWEATHER_API_KEY") {
            self.weather.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("SIBYL_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("SIBYL_PORT") {
            if let Ok(n) = v.parse() {
                self.server.port = n;
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "gemini" or "mock".
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    pub rest_base_url: String,
    pub search_base_url: String,
    pub timeout_secs: u64,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            rest_base_url: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            search_base_url: "https://en.wikipedia.org/w/api.php".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Spacing between LLM calls. The cooldown applies while the sticky error
/// counter is positive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub min_interval_secs: f64,
    pub cooldown_secs: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 5.0,
            cooldown_secs: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Capacity of the recent-query ring buffer.
    pub memory_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            memory_size: 5,
        }
    }
}

use anyhow::Result;
use async_trait::async_trait;

/// Parameters for a single LLM completion.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    /// Maximum tokens to generate (clamped to provider limits).
    pub max_tokens: u32,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request and return the model's raw text.
    ///
    /// Both the classification and the synthesis call go through this single
    /// method; the caller owns prompt construction and output parsing.
    async fn complete(&self, system: &str, user: &str, params: CompletionParams)
        -> Result<String>;
}

// Providers available in crate::providers

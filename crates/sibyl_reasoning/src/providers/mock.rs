//! Mock LLM provider — deterministic scripted replies for testing without
//! API keys. Each `complete()` call pops the next scripted reply; an
//! exhausted script returns a canned line.

use crate::llm::{CompletionParams, LlmClient};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// One scripted outcome for a mock call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Failure(String),
}

pub struct MockClient {
    script: Mutex<VecDeque<MockReply>>,
    /// When set, the last scripted reply is replayed forever.
    repeat_last: bool,
    call_count: AtomicUsize,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl MockClient {
    pub fn new(script: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat_last: false,
            call_count: AtomicUsize::new(0),
        }
    }

    /// A client that answers every call with the same text.
    pub fn always(text: &str) -> Self {
        let mut client = Self::new(vec![MockReply::Text(text.to_string())]);
        client.repeat_last = true;
        client
    }

    /// A client whose every call fails.
    pub fn always_failing(message: &str) -> Self {
        let mut client = Self::new(vec![MockReply::Failure(message.to_string())]);
        client.repeat_last = true;
        client
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _params: CompletionParams,
    ) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().await;
        let reply = match script.pop_front() {
            Some(reply) => {
                if self.repeat_last && script.is_empty() {
                    script.push_back(reply.clone());
                }
                reply
            }
            None => MockReply::Text("(mock) I received your prompt.".to_string()),
        };

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Failure(message) => anyhow::bail!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_pops_in_order() {
        let client = MockClient::new(vec![
            MockReply::Text("first".into()),
            MockReply::Failure("boom".into()),
        ]);
        assert_eq!(
            client
                .complete("", "", CompletionParams::default())
                .await
                .unwrap(),
            "first"
        );
        assert!(client
            .complete("", "", CompletionParams::default())
            .await
            .is_err());
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_always_repeats() {
        let client = MockClient::always("same");
        for _ in 0..3 {
            assert_eq!(
                client
                    .complete("sys", "user", CompletionParams::default())
                    .await
                    .unwrap(),
                "same"
            );
        }
    }
}

//! Integration tests for the Orchestrator.
//!
//! All LLM traffic goes through a scripted MockClient; the weather tool has
//! no API key (permanent error report) and the wikipedia tool points at an
//! unroutable local port, so no test touches the network successfully.

use sibyl_core::config::{SibylConfig, WikipediaConfig};
use sibyl_reasoning::providers::mock::{MockClient, MockReply};
use sibyl_reasoning::Orchestrator;

fn offline_config() -> SibylConfig {
    SibylConfig {
        wikipedia: WikipediaConfig {
            rest_base_url: "http://127.0.0.1:9/api/rest_v1/page/summary".to_string(),
            search_base_url: "http://127.0.0.1:9/w/api.php".to_string(),
            timeout_secs: 1,
        },
        ..SibylConfig::default()
    }
}

fn orchestrator(script: Vec<MockReply>) -> Orchestrator {
    Orchestrator::new(Box::new(MockClient::new(script)), &offline_config()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_happy_path_with_structured_reply() {
    let agent = orchestrator(vec![
        MockReply::Text(
            r#"{"needs_weather": false, "needs_wikipedia": false, "reasoning": "conversational"}"#
                .to_string(),
        ),
        MockReply::Text("REASONING: No tools needed.\nANSWER: Hello to you too!".to_string()),
    ]);

    let result = agent.process("good morning").await;
    assert_eq!(result.reasoning, "No tools needed.");
    assert_eq!(result.answer, "Hello to you too!");
}

#[tokio::test(start_paused = true)]
async fn test_classify_failure_falls_back_to_keywords() {
    // Classification fails, synthesis succeeds: still a well-formed result.
    let agent = orchestrator(vec![
        MockReply::Failure("quota exceeded".to_string()),
        MockReply::Text("REASONING: Degraded plan.\nANSWER: Here you go.".to_string()),
    ]);

    let result = agent.process("hello world").await;
    assert_eq!(result.answer, "Here you go.");
    assert!(!result.answer.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_plan_json_wrapped_in_prose_is_recovered() {
    let agent = orchestrator(vec![
        MockReply::Text(
            "Here is my decision: {\"needs_weather\": false, \"needs_wikipedia\": false, \"reasoning\": \"chat\"} — done."
                .to_string(),
        ),
        MockReply::Text("REASONING: ok.\nANSWER: fine.".to_string()),
    ]);

    let result = agent.process("how are you?").await;
    assert_eq!(result.answer, "fine.");
}

#[tokio::test(start_paused = true)]
async fn test_everything_failing_still_answers() {
    // Both LLM calls fail and no tool can run: generic echo fallback.
    let agent = Orchestrator::new(
        Box::new(MockClient::always_failing("provider down")),
        &offline_config(),
    )
    .unwrap();

    let result = agent.process("hello there").await;
    assert!(!result.answer.is_empty());
    assert_eq!(result.answer, "I understand you're asking about: hello there");
}

#[tokio::test(start_paused = true)]
async fn test_both_tools_failing_yields_generic_echo() {
    // Plan requests both tools; weather has no key, wikipedia is
    // unreachable, synthesis fails. The fallback answer must echo the
    // query and never contain the word "error".
    let agent = orchestrator(vec![
        MockReply::Text(
            r#"{"needs_weather": true, "needs_wikipedia": true, "reasoning": "needs both"}"#
                .to_string(),
        ),
        MockReply::Failure("provider down".to_string()),
    ]);

    let result = agent.process("What is the weather in Paris?").await;
    assert_eq!(
        result.answer,
        "I understand you're asking about: What is the weather in Paris?"
    );
    assert!(!result.answer.to_lowercase().contains("error"));
}

#[tokio::test(start_paused = true)]
async fn test_empty_answer_section_triggers_fallback() {
    // Synthesis parses but yields an empty answer: treated as a synthesis
    // failure so the caller still gets a non-empty answer.
    let agent = orchestrator(vec![
        MockReply::Failure("quota".to_string()),
        MockReply::Text("One. Two.".to_string()),
    ]);

    let result = agent.process("hi").await;
    assert_eq!(result.answer, "I understand you're asking about: hi");
}

#[tokio::test(start_paused = true)]
async fn test_two_llm_calls_per_query() {
    let client = std::sync::Arc::new(MockClient::always(
        "REASONING: r.\nANSWER: {\"not\": \"a plan\"} a.",
    ));

    struct Shared(std::sync::Arc<MockClient>);

    #[async_trait::async_trait]
    impl sibyl_reasoning::llm::LlmClient for Shared {
        async fn complete(
            &self,
            system: &str,
            user: &str,
            params: sibyl_reasoning::llm::CompletionParams,
        ) -> anyhow::Result<String> {
            self.0.complete(system, user, params).await
        }
    }

    let agent =
        Orchestrator::new(Box::new(Shared(client.clone())), &offline_config()).unwrap();
    let result = agent.process("just chatting").await;
    assert_eq!(client.calls(), 2);
    assert!(!result.answer.is_empty());
}

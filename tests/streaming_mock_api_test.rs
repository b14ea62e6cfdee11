//! Streaming against mocked provider APIs, driven by recorded fixtures

use futures::StreamExt;
use serde_json::json;
use unichat::prelude::*;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;

fn sse(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

#[tokio::test]
async fn openai_fragments_arrive_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o", "stream": true})))
        .respond_with(sse(support::fixture("openai/hello_world.sse")))
        .expect(1)
        .mount(&server)
        .await;

    let stream = support::mock_client(&server)
        .stream(&ChatRequest::new("gpt-4o", "Say hello"))
        .await
        .unwrap();
    assert_eq!(support::collect_text(stream).await, vec!["Hello", ", ", "world"]);
}

#[tokio::test]
async fn anthropic_skips_control_events() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(sse(support::fixture("anthropic/hello_world.sse")))
        .mount(&server)
        .await;

    let stream = support::mock_client(&server)
        .stream(&ChatRequest::new("claude-3-5-sonnet-latest", "Say hello"))
        .await
        .unwrap();
    assert_eq!(support::collect_text(stream).await, vec!["Hello", " world"]);
}

#[tokio::test]
async fn anthropic_error_event_ends_the_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(sse(support::fixture("anthropic/overloaded_midstream.sse")))
        .mount(&server)
        .await;

    let items: Vec<_> = support::mock_client(&server)
        .stream(&ChatRequest::new("claude-3-haiku", "Say hello"))
        .await
        .unwrap()
        .collect()
        .await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().unwrap(), "Partial");
    assert!(matches!(&items[1], Err(LlmError::StreamError(m)) if m.contains("Overloaded")));
}

#[tokio::test]
async fn gemini_streams_over_sse_and_skips_thoughts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:streamGenerateContent"))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "test-gemini-key"))
        .respond_with(sse(support::fixture("gemini/thought_then_text.sse")))
        .expect(1)
        .mount(&server)
        .await;

    let stream = support::mock_client(&server)
        .stream(&ChatRequest::new("gemini-2.0-flash", "Say hello"))
        .await
        .unwrap();
    assert_eq!(support::collect_text(stream).await, vec!["Hello", " world"]);
}

#[tokio::test]
async fn ollama_streams_json_lines() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"model": "llama3", "stream": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(support::fixture("ollama/hello_world.ndjson"), "application/x-ndjson"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stream = support::mock_client(&server)
        .stream(&ChatRequest::new("ollama/llama3", "Say hello"))
        .await
        .unwrap();
    assert_eq!(support::collect_text(stream).await, vec!["Hello", " world"]);
}

#[tokio::test]
async fn error_status_fails_before_streaming() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "model \"nope\" not found"})),
        )
        .mount(&server)
        .await;

    let err = support::mock_client(&server)
        .stream(&ChatRequest::new("ollama/nope", "Say hello"))
        .await
        .err()
        .expect("stream should not open");
    assert!(matches!(err, LlmError::ApiError { code: 404, ref message } if message.contains("not found")));
}

#[tokio::test]
async fn dropping_the_stream_early_is_clean() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(sse(support::fixture("openai/hello_world.sse")))
        .mount(&server)
        .await;

    let client = support::mock_client(&server);
    let mut stream = client.stream(&ChatRequest::new("gpt-4o", "Say hello")).await.unwrap();
    assert_eq!(stream.next().await.unwrap().unwrap(), "Hello");
    drop(stream);

    // A fresh call starts a fresh stream.
    let stream = client.stream(&ChatRequest::new("gpt-4o", "Say hello")).await.unwrap();
    assert_eq!(support::collect_text(stream).await.concat(), "Hello, world");
}

//! Shared helpers for mock-server tests

#![allow(dead_code)]

use unichat::prelude::*;
use wiremock::MockServer;

/// Read a file under `tests/fixtures/`
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {path}: {e}"))
        .replace("\r\n", "\n")
}

/// Config with every provider pointed at `server` and test keys for the cloud APIs
pub fn mock_config(server: &MockServer) -> ClientConfig {
    let uri = server.uri();
    ProviderType::ALL
        .iter()
        .fold(ClientConfig::default(), |config, provider| {
            config.with_base_url(*provider, uri.clone())
        })
        .with_api_key(ProviderType::OpenAi, "test-openai-key")
        .with_api_key(ProviderType::Anthropic, "test-anthropic-key")
        .with_api_key(ProviderType::Gemini, "test-gemini-key")
}

pub fn mock_client(server: &MockServer) -> LlmClient {
    LlmClient::from_config(mock_config(server))
}

/// Drain a stream, panicking on the first error
pub async fn collect_text(stream: TextStream) -> Vec<String> {
    use futures::StreamExt;
    stream
        .map(|fragment| fragment.expect("stream fragment"))
        .collect()
        .await
}

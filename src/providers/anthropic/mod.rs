//! Anthropic provider
//!
//! Messages API (`/v1/messages`). Authentication uses `x-api-key`; the key is
//! optional here and a missing one surfaces as the API's 401.

pub mod streaming;
pub mod transformers;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::LlmError;
use crate::executors::chat::HttpChatExecutor;
use crate::provider::ProviderType;
use crate::registry::ProviderHandle;
use crate::utils::streaming::StreamFormat;
use crate::utils::url::join_url;

pub use streaming::AnthropicEventConverter;
pub use transformers::{AnthropicRequestTransformer, AnthropicResponseTransformer};

/// Messages API version sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Build the chat executor for an Anthropic handle
pub fn chat_executor(handle: &ProviderHandle) -> Result<HttpChatExecutor, LlmError> {
    handle.ensure_provider(ProviderType::Anthropic)?;
    let url = join_url(handle.base_url(), "/v1/messages");
    let api_key = handle.api_key().map(str::to_string);

    Ok(HttpChatExecutor {
        provider: ProviderType::Anthropic,
        http_client: handle.http_client().clone(),
        timeout: handle.timeout(),
        request_transformer: Arc::new(AnthropicRequestTransformer),
        response_transformer: Arc::new(AnthropicResponseTransformer),
        stream_transformer: Arc::new(AnthropicEventConverter),
        stream_format: StreamFormat::Sse,
        build_url: Box::new(move |_, _| url.clone()),
        build_headers: Box::new(move || build_headers(api_key.as_deref())),
    })
}

fn build_headers(api_key: Option<&str>) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("anthropic-version"),
        HeaderValue::from_static(ANTHROPIC_VERSION),
    );
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(key).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid Anthropic API key: {e}"))
        })?;
        headers.insert(HeaderName::from_static("x-api-key"), value);
    }
    Ok(headers)
}

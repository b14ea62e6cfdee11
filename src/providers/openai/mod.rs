//! OpenAI provider
//!
//! Chat Completions API (`/chat/completions`) with bearer authentication. The key
//! is optional at this layer; without one no `Authorization` header is sent and
//! the API's rejection surfaces as an [`LlmError::ApiError`].

pub mod streaming;
pub mod transformers;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::LlmError;
use crate::executors::chat::HttpChatExecutor;
use crate::provider::ProviderType;
use crate::registry::ProviderHandle;
use crate::utils::streaming::StreamFormat;
use crate::utils::url::join_url;

pub use streaming::OpenAiEventConverter;
pub use transformers::{OpenAiRequestTransformer, OpenAiResponseTransformer};

/// Build the chat executor for an OpenAI handle
pub fn chat_executor(handle: &ProviderHandle) -> Result<HttpChatExecutor, LlmError> {
    handle.ensure_provider(ProviderType::OpenAi)?;
    let url = join_url(handle.base_url(), "/chat/completions");
    let api_key = handle.api_key().map(str::to_string);

    Ok(HttpChatExecutor {
        provider: ProviderType::OpenAi,
        http_client: handle.http_client().clone(),
        timeout: handle.timeout(),
        request_transformer: Arc::new(OpenAiRequestTransformer),
        response_transformer: Arc::new(OpenAiResponseTransformer),
        stream_transformer: Arc::new(OpenAiEventConverter),
        stream_format: StreamFormat::Sse,
        build_url: Box::new(move |_, _| url.clone()),
        build_headers: Box::new(move || build_headers(api_key.as_deref())),
    })
}

fn build_headers(api_key: Option<&str>) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key {
        let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid OpenAI API key: {e}"))
        })?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

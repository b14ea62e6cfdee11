//! Google Gemini provider
//!
//! Generative Language API (`generateContent` / `streamGenerateContent`). An API
//! key is mandatory; the registry refuses to build a Gemini handle without one.

pub mod streaming;
pub mod transformers;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::LlmError;
use crate::executors::chat::HttpChatExecutor;
use crate::provider::ProviderType;
use crate::registry::ProviderHandle;
use crate::types::ChatRequest;
use crate::utils::streaming::StreamFormat;
use crate::utils::url::join_url;

pub use streaming::GeminiEventConverter;
pub use transformers::{GeminiRequestTransformer, GeminiResponseTransformer};

/// Build the chat executor for a Gemini handle
pub fn chat_executor(handle: &ProviderHandle) -> Result<HttpChatExecutor, LlmError> {
    handle.ensure_provider(ProviderType::Gemini)?;
    let api_key = handle
        .api_key()
        .map(str::to_string)
        .ok_or_else(|| LlmError::ConfigurationError("Gemini API key is missing".to_string()))?;
    let base_url = handle.base_url().to_string();

    Ok(HttpChatExecutor {
        provider: ProviderType::Gemini,
        http_client: handle.http_client().clone(),
        timeout: handle.timeout(),
        request_transformer: Arc::new(GeminiRequestTransformer),
        response_transformer: Arc::new(GeminiResponseTransformer),
        stream_transformer: Arc::new(GeminiEventConverter),
        stream_format: StreamFormat::Sse,
        build_url: Box::new(move |req, stream| build_url(&base_url, req, stream)),
        build_headers: Box::new(move || build_headers(&api_key)),
    })
}

/// `{base}/v1beta/models/{model}:generateContent`, or the SSE streaming variant
pub fn build_url(base_url: &str, req: &ChatRequest, stream: bool) -> String {
    let model = req.model.strip_prefix("models/").unwrap_or(&req.model);
    let model = urlencoding::encode(model);
    let method = if stream {
        "streamGenerateContent?alt=sse"
    } else {
        "generateContent"
    };
    join_url(base_url, &format!("/v1beta/models/{model}:{method}"))
}

fn build_headers(api_key: &str) -> Result<HeaderMap, LlmError> {
    let value = HeaderValue::from_str(api_key)
        .map_err(|e| LlmError::ConfigurationError(format!("Invalid Gemini API key: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-goog-api-key"), value);
    Ok(headers)
}

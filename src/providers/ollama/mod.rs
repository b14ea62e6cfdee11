//! Ollama provider
//!
//! Talks to the native Ollama REST API (`/api/chat`, `/api/tags`). No credentials
//! are needed. Model ids may carry the `ollama/` routing prefix, which is removed
//! before the request is sent.

pub mod models;
pub mod streaming;
pub mod transformers;

use std::sync::Arc;

use reqwest::header::HeaderMap;

use crate::error::LlmError;
use crate::executors::chat::HttpChatExecutor;
use crate::provider::ProviderType;
use crate::registry::ProviderHandle;
use crate::utils::streaming::StreamFormat;
use crate::utils::url::join_url;

pub use models::list_models;
pub use streaming::OllamaEventConverter;
pub use transformers::{OllamaRequestTransformer, OllamaResponseTransformer};

/// Build the chat executor for an Ollama handle
pub fn chat_executor(handle: &ProviderHandle) -> Result<HttpChatExecutor, LlmError> {
    handle.ensure_provider(ProviderType::Ollama)?;
    let url = join_url(handle.base_url(), "/api/chat");

    Ok(HttpChatExecutor {
        provider: ProviderType::Ollama,
        http_client: handle.http_client().clone(),
        timeout: handle.timeout(),
        request_transformer: Arc::new(OllamaRequestTransformer),
        response_transformer: Arc::new(OllamaResponseTransformer),
        stream_transformer: Arc::new(OllamaEventConverter),
        stream_format: StreamFormat::JsonLines,
        build_url: Box::new(move |_, _| url.clone()),
        build_headers: Box::new(|| Ok(HeaderMap::new())),
    })
}

//! Chat executor
//!
//! [`HttpChatExecutor`] is the per-provider adapter: it builds the body with the
//! provider's request transformer, sends it, and hands the reply to the response
//! transformer (blocking) or the stream converter (streaming).

use crate::error::LlmError;
use crate::provider::ProviderType;
use crate::stream::TextStream;
use crate::transformers::{
    request::RequestTransformer, response::ResponseTransformer, stream::StreamChunkTransformer,
};
use crate::types::ChatRequest;
use crate::utils::error_handling::ensure_success;
use crate::utils::streaming::{StreamFactory, StreamFormat};
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

#[async_trait::async_trait]
pub trait ChatExecutor: Send + Sync {
    /// Build the provider call for `req`, send it and return the raw JSON reply
    async fn execute_raw(&self, req: &ChatRequest) -> Result<serde_json::Value, LlmError>;

    /// Unwrap the answer text from a raw reply
    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError>;

    /// Open the provider's incremental channel for `req`
    async fn execute_stream(&self, req: &ChatRequest) -> Result<TextStream, LlmError>;

    /// Blocking chat: send, then extract the text
    async fn execute(&self, req: &ChatRequest) -> Result<String, LlmError> {
        let raw = self.execute_raw(req).await?;
        self.extract_text(&raw)
    }
}

/// URL strategy: `(request, stream) -> url`
pub type UrlBuilder = Box<dyn Fn(&ChatRequest, bool) -> String + Send + Sync>;

/// Header strategy, called once per request
pub type HeaderBuilder = Box<dyn Fn() -> Result<HeaderMap, LlmError> + Send + Sync>;

/// Generic HTTP-based ChatExecutor that wires transformers and HTTP
pub struct HttpChatExecutor {
    pub provider: ProviderType,
    pub http_client: reqwest::Client,
    pub timeout: Duration,
    pub request_transformer: Arc<dyn RequestTransformer>,
    pub response_transformer: Arc<dyn ResponseTransformer>,
    pub stream_transformer: Arc<dyn StreamChunkTransformer>,
    pub stream_format: StreamFormat,
    // Strategy hooks
    pub build_url: UrlBuilder,
    pub build_headers: HeaderBuilder,
}

impl HttpChatExecutor {
    /// Body the executor would send for `req`, without sending it
    pub fn build_body(&self, req: &ChatRequest, stream: bool) -> Result<serde_json::Value, LlmError> {
        self.request_transformer.transform_chat(req, stream)
    }

    fn prepare(&self, req: &ChatRequest, stream: bool) -> Result<reqwest::RequestBuilder, LlmError> {
        let body = self.build_body(req, stream)?;
        let url = (self.build_url)(req, stream);
        let headers = (self.build_headers)()?;
        tracing::debug!(
            provider = self.provider.id(),
            model = %req.model,
            stream,
            "POST {}",
            url
        );
        Ok(self.http_client.post(url).headers(headers).json(&body))
    }
}

impl std::fmt::Debug for HttpChatExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatExecutor")
            .field("provider", &self.provider)
            .field("timeout", &self.timeout)
            .field("stream_format", &self.stream_format)
            .finish()
    }
}

#[async_trait::async_trait]
impl ChatExecutor for HttpChatExecutor {
    async fn execute_raw(&self, req: &ChatRequest) -> Result<serde_json::Value, LlmError> {
        let resp = self
            .prepare(req, false)?
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;
        let resp = ensure_success(resp).await?;

        let text = resp
            .text()
            .await
            .map_err(|e| LlmError::HttpError(e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse response JSON: {e}")))
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError> {
        self.response_transformer.extract_text(raw)
    }

    async fn execute_stream(&self, req: &ChatRequest) -> Result<TextStream, LlmError> {
        let request_builder = self.prepare(req, true)?;
        StreamFactory::create_text_stream(
            request_builder,
            self.stream_format,
            self.stream_transformer.clone(),
            self.timeout,
        )
        .await
    }
}

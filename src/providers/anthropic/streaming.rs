//! Anthropic streaming
//!
//! The Messages API streams typed SSE events. Only `content_block_delta` events
//! with a `text_delta` carry answer text; `message_start`, `ping`, thinking
//! deltas and the stop events are skipped. An `error` event ends the stream.

use crate::error::LlmError;
use crate::transformers::stream::StreamChunkTransformer;
use serde::Deserialize;

/// Anthropic stream event structure
#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamEvent {
    r#type: String,
    #[serde(default)]
    delta: Option<AnthropicDelta>,
    #[serde(default)]
    error: Option<AnthropicError>,
}

/// Supports the delta subtypes: text_delta, input_json_delta, thinking_delta
#[derive(Debug, Clone, Deserialize)]
struct AnthropicDelta {
    #[serde(rename = "type", default)]
    delta_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicError {
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Anthropic event converter
#[derive(Clone, Default)]
pub struct AnthropicEventConverter;

impl StreamChunkTransformer for AnthropicEventConverter {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError> {
        let event: AnthropicStreamEvent = serde_json::from_str(data).map_err(|e| {
            tracing::warn!("Failed to parse Anthropic SSE event: {}", e);
            LlmError::ParseError(format!("Failed to parse Anthropic event: {e}. Raw data: {data}"))
        })?;

        match event.r#type.as_str() {
            "content_block_delta" => Ok(event
                .delta
                .filter(|d| d.delta_type.as_deref().is_none_or(|t| t == "text_delta"))
                .and_then(|d| d.text)
                .filter(|text| !text.is_empty())),
            "error" => {
                let error = event.error;
                let message = error
                    .as_ref()
                    .and_then(|e| e.message.clone())
                    .unwrap_or_else(|| "Unknown error".to_string());
                let kind = error
                    .and_then(|e| e.error_type)
                    .unwrap_or_else(|| "error".to_string());
                Err(LlmError::StreamError(format!("Anthropic {kind}: {message}")))
            }
            _ => Ok(None),
        }
    }
}

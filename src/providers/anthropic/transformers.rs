//! Transformers for Anthropic Claude
//!
//! The system instruction goes in the top-level `system` field. Temperature is
//! sent only when it is at most 1.0; larger values are dropped from the body so
//! the API default applies, rather than being clamped or rejected.

use crate::error::LlmError;
use crate::transformers::{request::RequestTransformer, response::ResponseTransformer};
use crate::types::ChatRequest;

/// Highest temperature forwarded to the Messages API
pub const MAX_TEMPERATURE: f64 = 1.0;

/// Request transformer for Anthropic
#[derive(Clone, Default)]
pub struct AnthropicRequestTransformer;

impl RequestTransformer for AnthropicRequestTransformer {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn transform_chat(&self, req: &ChatRequest, stream: bool) -> Result<serde_json::Value, LlmError> {
        let mut body = serde_json::json!({
            "model": req.model,
            "max_tokens": req.max_tokens,
            "messages": [{ "role": "user", "content": req.prompt }],
        });
        if let Some(system) = &req.system {
            body["system"] = serde_json::json!(system);
        }
        if req.temperature <= MAX_TEMPERATURE {
            body["temperature"] = serde_json::json!(req.temperature);
        } else {
            tracing::debug!(
                "Omitting temperature {} for {} (above {})",
                req.temperature,
                req.model,
                MAX_TEMPERATURE
            );
        }
        if stream {
            body["stream"] = serde_json::json!(true);
        }
        Ok(body)
    }
}

/// Response transformer for Anthropic
#[derive(Clone, Default)]
pub struct AnthropicResponseTransformer;

impl ResponseTransformer for AnthropicResponseTransformer {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError> {
        // Thinking blocks may precede the answer; take the first text block.
        raw.get("content")
            .and_then(|c| c.as_array())
            .and_then(|blocks| {
                blocks
                    .iter()
                    .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                    .find_map(|b| b.get("text").and_then(|t| t.as_str()))
            })
            .map(str::to_string)
            .ok_or_else(|| LlmError::missing_field("anthropic", "content[].text"))
    }
}

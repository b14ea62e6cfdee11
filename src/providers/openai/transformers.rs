//! Transformers for OpenAI Chat Completions
//!
//! The system instruction is sent as a `system` message ahead of the user
//! message. `response_format` is the only provider option forwarded.

use crate::error::LlmError;
use crate::transformers::{request::RequestTransformer, response::ResponseTransformer};
use crate::types::{ChatRequest, RESPONSE_FORMAT_OPTION};

#[derive(Clone, Default)]
pub struct OpenAiRequestTransformer;

impl RequestTransformer for OpenAiRequestTransformer {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn transform_chat(&self, req: &ChatRequest, stream: bool) -> Result<serde_json::Value, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &req.system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": req.prompt }));

        let mut body = serde_json::json!({
            "model": req.model,
            "messages": messages,
            "max_tokens": req.max_tokens,
            "temperature": req.temperature,
        });

        if let Some(format) = req.option(RESPONSE_FORMAT_OPTION).filter(|v| !v.is_null()) {
            body["response_format"] = format.clone();
        }
        if stream {
            body["stream"] = serde_json::json!(true);
        }
        Ok(body)
    }
}

#[derive(Clone, Default)]
pub struct OpenAiResponseTransformer;

impl ResponseTransformer for OpenAiResponseTransformer {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError> {
        raw.pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::missing_field("openai", "choices[0].message.content"))
    }
}

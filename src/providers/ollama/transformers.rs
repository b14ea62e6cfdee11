//! Transformers for Ollama Chat
//!
//! System instruction becomes a `system` message; sampling parameters go under
//! `options` (`temperature`, `num_predict`). Extra provider options are ignored.

use crate::error::LlmError;
use crate::provider::strip_ollama_prefix;
use crate::transformers::{request::RequestTransformer, response::ResponseTransformer};
use crate::types::ChatRequest;

#[derive(Clone, Default)]
pub struct OllamaRequestTransformer;

impl RequestTransformer for OllamaRequestTransformer {
    fn provider_id(&self) -> &str {
        "ollama"
    }

    fn transform_chat(&self, req: &ChatRequest, stream: bool) -> Result<serde_json::Value, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &req.system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": req.prompt }));

        Ok(serde_json::json!({
            "model": strip_ollama_prefix(&req.model),
            "messages": messages,
            "stream": stream,
            "options": {
                "temperature": req.temperature,
                "num_predict": req.max_tokens,
            },
        }))
    }
}

#[derive(Clone, Default)]
pub struct OllamaResponseTransformer;

impl ResponseTransformer for OllamaResponseTransformer {
    fn provider_id(&self) -> &str {
        "ollama"
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError> {
        raw.pointer("/message/content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::missing_field("ollama", "message.content"))
    }
}

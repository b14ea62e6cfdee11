//! Transformers for Google Gemini
//!
//! The system instruction is sent as `systemInstruction`; temperature and
//! `maxOutputTokens` go under `generationConfig`. The reply text is the
//! concatenation of the first candidate's non-thought text parts.

use crate::error::LlmError;
use crate::transformers::{request::RequestTransformer, response::ResponseTransformer};
use crate::types::ChatRequest;

#[derive(Clone, Default)]
pub struct GeminiRequestTransformer;

impl RequestTransformer for GeminiRequestTransformer {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    // Streaming is selected by the endpoint, not the body.
    fn transform_chat(&self, req: &ChatRequest, _stream: bool) -> Result<serde_json::Value, LlmError> {
        let mut body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": req.prompt }] }],
            "generationConfig": {
                "temperature": req.temperature,
                "maxOutputTokens": req.max_tokens,
            },
        });
        if let Some(system) = &req.system {
            body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
        }
        Ok(body)
    }
}

#[derive(Clone, Default)]
pub struct GeminiResponseTransformer;

impl ResponseTransformer for GeminiResponseTransformer {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError> {
        if let Some(text) = candidate_text(raw) {
            return Ok(text);
        }
        match raw.pointer("/promptFeedback/blockReason").and_then(|r| r.as_str()) {
            Some(reason) => Err(LlmError::MalformedResponse(format!(
                "gemini reply has no text (prompt blocked: {reason})"
            ))),
            None => Err(LlmError::missing_field("gemini", "candidates[0].content.parts[].text")),
        }
    }
}

/// Concatenated text of the first candidate, or `None` if it has no text parts
pub(crate) fn candidate_text(raw: &serde_json::Value) -> Option<String> {
    let parts = raw.pointer("/candidates/0/content/parts")?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter(|p| p.get("thought").and_then(|t| t.as_bool()) != Some(true))
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

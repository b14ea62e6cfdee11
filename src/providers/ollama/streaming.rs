//! Ollama streaming
//!
//! Ollama streams one JSON object per line. Each carries a `message.content`
//! fragment; the final object has `done: true` and usually empty content. An
//! object with an `error` field reports a failure mid-stream.

use crate::error::LlmError;
use crate::transformers::stream::StreamChunkTransformer;
use serde::Deserialize;

/// Ollama stream response structure
#[derive(Debug, Clone, Deserialize)]
struct OllamaStreamResponse {
    message: Option<OllamaMessage>,
    error: Option<String>,
}

/// Ollama message structure
#[derive(Debug, Clone, Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

/// Ollama event converter
#[derive(Clone, Default)]
pub struct OllamaEventConverter;

impl StreamChunkTransformer for OllamaEventConverter {
    fn provider_id(&self) -> &str {
        "ollama"
    }

    fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError> {
        let chunk: OllamaStreamResponse = serde_json::from_str(data).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse Ollama stream line: {e}. Raw data: {data}"))
        })?;

        if let Some(error) = chunk.error {
            return Err(LlmError::StreamError(format!("Ollama error: {error}")));
        }

        Ok(chunk
            .message
            .and_then(|m| m.content)
            .filter(|content| !content.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_lines_become_fragments() {
        let line = r#"{"model":"llama3","message":{"role":"assistant","content":"Hel"},"done":false}"#;
        assert_eq!(OllamaEventConverter.convert_event(line).unwrap().as_deref(), Some("Hel"));
    }

    #[test]
    fn done_line_with_empty_content_is_skipped() {
        let line = r#"{"model":"llama3","message":{"role":"assistant","content":""},"done":true,"eval_count":12}"#;
        assert_eq!(OllamaEventConverter.convert_event(line).unwrap(), None);
    }

    #[test]
    fn error_line_is_an_error() {
        let err = OllamaEventConverter
            .convert_event(r#"{"error":"model not found"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            OllamaEventConverter.convert_event("not json"),
            Err(LlmError::ParseError(_))
        ));
    }
}

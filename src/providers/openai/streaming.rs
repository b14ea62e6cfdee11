//! OpenAI streaming
//!
//! Chat Completions streams SSE chunks with `choices[0].delta.content`. The first
//! chunk carries only the role and the last only a finish reason; both are
//! skipped. The `[DONE]` sentinel is handled by the stream factory.

use crate::error::LlmError;
use crate::transformers::stream::StreamChunkTransformer;
use crate::utils::error_handling::error_message;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiStreamChoice {
    delta: Option<OpenAiDelta>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiDelta {
    content: Option<String>,
}

/// OpenAI event converter
#[derive(Clone, Default)]
pub struct OpenAiEventConverter;

impl StreamChunkTransformer for OpenAiEventConverter {
    fn provider_id(&self) -> &str {
        "openai"
    }

    fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError> {
        let json: serde_json::Value = serde_json::from_str(data).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse OpenAI event: {e}. Raw data: {data}"))
        })?;

        if let Some(message) = error_message(&json) {
            return Err(LlmError::StreamError(format!("OpenAI error: {message}")));
        }

        let chunk: OpenAiStreamChunk = serde_json::from_value(json)?;
        Ok(chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty()))
    }
}

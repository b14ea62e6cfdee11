//! Gemini streaming
//!
//! With `alt=sse`, each SSE event is a complete `GenerateContentResponse`
//! holding the next slice of text. Chunks with no text (final usage metadata,
//! thought-only parts) are skipped.

use super::transformers::candidate_text;
use crate::error::LlmError;
use crate::transformers::stream::StreamChunkTransformer;
use crate::utils::error_handling::error_message;

/// Gemini event converter
#[derive(Clone, Default)]
pub struct GeminiEventConverter;

impl StreamChunkTransformer for GeminiEventConverter {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError> {
        let json: serde_json::Value = serde_json::from_str(data).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse Gemini event: {e}. Raw data: {data}"))
        })?;

        if let Some(message) = error_message(&json) {
            return Err(LlmError::StreamError(format!("Gemini error: {message}")));
        }

        Ok(candidate_text(&json).filter(|text| !text.is_empty()))
    }
}

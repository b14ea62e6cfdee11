//! Request transformation traits
//!
//! Converts the unified [`ChatRequest`] into a provider-specific JSON body.

use crate::error::LlmError;
use crate::types::ChatRequest;

/// Transform a unified chat request into a provider payload
pub trait RequestTransformer: Send + Sync {
    /// Provider identifier (e.g., "openai", "anthropic", "gemini", "ollama")
    fn provider_id(&self) -> &str;

    /// Build the JSON body for a chat call. `stream` selects the incremental variant.
    fn transform_chat(&self, req: &ChatRequest, stream: bool) -> Result<serde_json::Value, LlmError>;
}

//! Provider adapters
//!
//! One module per backend. Each exposes `chat_executor(handle)`, which wires the
//! provider's transformers and endpoint strategy into an [`HttpChatExecutor`].

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

use crate::error::LlmError;
use crate::executors::chat::HttpChatExecutor;
use crate::provider::ProviderType;
use crate::registry::ProviderHandle;

/// Build the chat executor matching the handle's provider
pub fn chat_executor(handle: &ProviderHandle) -> Result<HttpChatExecutor, LlmError> {
    match handle.provider() {
        ProviderType::Ollama => ollama::chat_executor(handle),
        ProviderType::OpenAi => openai::chat_executor(handle),
        ProviderType::Anthropic => anthropic::chat_executor(handle),
        ProviderType::Gemini => gemini::chat_executor(handle),
    }
}

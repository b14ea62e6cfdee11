//! Response transformation traits

use crate::error::LlmError;

/// Extract the answer text from a provider reply envelope
pub trait ResponseTransformer: Send + Sync {
    /// Provider identifier
    fn provider_id(&self) -> &str;

    /// Unwrap the single textual answer.
    ///
    /// Fails with [`LlmError::MalformedResponse`] when the expected field is
    /// absent; never returns an empty placeholder in its place.
    fn extract_text(&self, raw: &serde_json::Value) -> Result<String, LlmError>;
}

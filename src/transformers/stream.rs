//! Stream chunk transformation traits
//!
//! Converts one provider stream event (an SSE `data:` payload or one line of
//! newline-delimited JSON) into at most one text fragment.

use crate::error::LlmError;

/// Convert provider stream events into text fragments
pub trait StreamChunkTransformer: Send + Sync {
    /// Provider identifier
    fn provider_id(&self) -> &str;

    /// Convert a single event payload.
    ///
    /// `Ok(None)` means the event carries no text (role headers, usage, stop
    /// markers) and is skipped. An `Err` ends the stream after it is yielded.
    fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError>;
}

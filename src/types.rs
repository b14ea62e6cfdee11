//! Chat request types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default maximum number of output tokens
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Provider option key carrying a structured-output request (OpenAI only)
pub const RESPONSE_FORMAT_OPTION: &str = "response_format";

/// A provider-agnostic chat request
///
/// The prompt is required by construction. An empty prompt is a caller error and
/// is sent to the backend unchanged.
///
/// # Example
///
/// ```rust
/// use unichat::types::ChatRequest;
///
/// let request = ChatRequest::new("gpt-4o", "What is ML?")
///     .with_system("Answer in one sentence")
///     .with_temperature(0.2)
///     .with_max_tokens(256)
///     .with_json_output();
///
/// assert_eq!(request.system.as_deref(), Some("Answer in one sentence"));
/// assert!(request.provider_options.contains_key("response_format"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. `gpt-4o`, `claude-sonnet-4-20250514`, `ollama/llama3`
    pub model: String,
    /// The user message
    pub prompt: String,
    /// Optional system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Sampling temperature (0.0 - 2.0; providers may restrict further)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum number of output tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Extra provider-specific options keyed by option name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_options: HashMap<String, serde_json::Value>,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ChatRequest {
    /// Create a request with default sampling parameters
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            provider_options: HashMap::new(),
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the system instruction if one is given
    pub fn with_optional_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Add a provider-specific option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.provider_options.insert(key.into(), value.into());
        self
    }

    /// Ask for a JSON object reply. Only the OpenAI adapter honors this.
    pub fn with_json_output(self) -> Self {
        self.with_option(
            RESPONSE_FORMAT_OPTION,
            serde_json::json!({ "type": "json_object" }),
        )
    }

    /// Return a copy of this request addressed to another model
    pub fn for_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    /// Look up a provider-specific option
    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.provider_options.get(key)
    }
}

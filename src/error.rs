//! Error Handling Module
//!
//! A single error type, [`LlmError`], is returned by every fallible operation in
//! the crate. Variants are grouped into coarse [`ErrorCategory`] values so callers
//! can tell a missing credential from a backend failure without matching every
//! variant.
//!
//! # Example
//!
//! ```rust
//! use unichat::error::{ErrorCategory, LlmError};
//!
//! let error = LlmError::api_error(503, "overloaded");
//! assert_eq!(error.category(), ErrorCategory::Transport);
//! assert!(error.is_transport());
//! ```

use thiserror::Error;

/// Coarse grouping of [`LlmError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Required configuration (credentials) is missing or invalid
    Configuration,
    /// Network or backend failure during a blocking or streaming call
    Transport,
    /// The backend answered but the reply did not have the expected shape
    Response,
    /// The model or provider name maps to no implemented adapter
    Unsupported,
}

/// Errors produced by the chat core
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// A credential required by a provider is absent from the environment
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request could not be sent or the connection failed
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The backend answered with a non-success status
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// The connection failed while a stream was being read
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The reply body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The reply parsed but the expected text field is absent
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No adapter is implemented for the requested provider
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),
}

impl LlmError {
    /// Build an [`LlmError::ApiError`]
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Build an [`LlmError::MalformedResponse`] naming the provider and missing field
    pub fn missing_field(provider: &str, field: &str) -> Self {
        Self::MalformedResponse(format!("{provider} reply has no `{field}`"))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::HttpError(_) | Self::ApiError { .. } | Self::StreamError(_) => {
                ErrorCategory::Transport
            }
            Self::ParseError(_) | Self::MalformedResponse(_) => ErrorCategory::Response,
            Self::UnsupportedProvider(_) => ErrorCategory::Unsupported,
        }
    }

    /// True for network and backend failures
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::api_error(status.as_u16(), e.to_string()),
            None => Self::HttpError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

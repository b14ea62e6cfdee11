//! # unichat
//!
//! A provider-agnostic chat core. Callers build a [`ChatRequest`] naming a model
//! and get back the reply text, either complete or as a stream of fragments. The
//! backend (Ollama, OpenAI, Anthropic or Gemini) is chosen from the model id
//! alone.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use unichat::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let client = LlmClient::new();
//!
//!     let request = ChatRequest::new("gpt-4o", "What is ML?").with_system("Be brief");
//!     println!("{}", client.chat(&request).await?);
//!
//!     let mut stream = client.stream(&request.for_model("ollama/llama3")).await?;
//!     while let Some(fragment) = stream.next().await {
//!         print!("{}", fragment?);
//!     }
//!
//!     let result = client
//!         .compare(["gpt-4o", "claude-3-5-sonnet-latest"], &request)
//!         .await;
//!     for (model, error) in result.failures() {
//!         eprintln!("{model}: {error}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Model routing
//!
//! | Model id | Provider |
//! |---|---|
//! | `ollama/<name>` | Ollama |
//! | contains `gpt` or `o1`, or starts with `ft:` | OpenAI |
//! | contains `claude` | Anthropic |
//! | contains `gemini` | Gemini |
//! | anything else | Ollama |
//!
//! Endpoints and credentials come from the environment; see [`config`].

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod executors;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod stream;
pub mod transformers;
pub mod types;
pub mod utils;

pub use client::LlmClient;
pub use compare::{ComparisonResult, ModelOutcome};
pub use config::ClientConfig;
pub use error::{ErrorCategory, LlmError};
pub use provider::{ProviderType, identify_provider};
pub use registry::{ClientRegistry, ProviderHandle};
pub use stream::TextStream;
pub use types::ChatRequest;

/// Commonly used types
pub mod prelude {
    pub use crate::client::LlmClient;
    pub use crate::compare::{ComparisonResult, ModelOutcome, compare, compare_with};
    pub use crate::config::ClientConfig;
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::provider::ProviderType;
    pub use crate::stream::TextStream;
    pub use crate::types::ChatRequest;
}

/// Send `request` through the process-wide client
pub async fn chat(request: &ChatRequest) -> Result<String, LlmError> {
    LlmClient::new().chat(request).await
}

/// Stream `request` through the process-wide client
pub async fn stream(request: &ChatRequest) -> Result<TextStream, LlmError> {
    LlmClient::new().stream(request).await
}

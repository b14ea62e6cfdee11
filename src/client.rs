//! Chat facade
//!
//! [`LlmClient`] is the single entry point callers use. It routes a request to a
//! provider from the model id alone, fetches the cached handle from the
//! [`ClientRegistry`] and runs the provider's executor. Errors propagate
//! unchanged.

use std::sync::Arc;

use crate::compare::{ComparisonResult, ModelOutcome, compare, compare_with};
use crate::config::ClientConfig;
use crate::error::LlmError;
use crate::executors::chat::{ChatExecutor, HttpChatExecutor};
use crate::provider::ProviderType;
use crate::providers;
use crate::registry::ClientRegistry;
use crate::stream::TextStream;
use crate::types::ChatRequest;

/// Provider-agnostic chat client
///
/// Cloning is cheap; clones share the same registry and therefore the same
/// provider handles.
#[derive(Debug, Clone)]
pub struct LlmClient {
    registry: Arc<ClientRegistry>,
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmClient {
    /// Client backed by the process-wide registry (configured from the environment)
    pub fn new() -> Self {
        Self::with_registry(ClientRegistry::global())
    }

    pub fn with_registry(registry: Arc<ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Client with its own registry built from `config`
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_registry(Arc::new(ClientRegistry::new(config)))
    }

    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    async fn executor_for(&self, model: &str) -> Result<HttpChatExecutor, LlmError> {
        let provider = ProviderType::from_model(model);
        let handle = self.registry.get_handle(provider).await?;
        providers::chat_executor(&handle)
    }

    /// Send `request` and wait for the complete reply text
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.executor_for(&request.model).await?.execute(request).await
    }

    /// Send `request` and return its reply as a stream of text fragments.
    ///
    /// Drop the stream to cancel; the connection is released with it.
    pub async fn stream(&self, request: &ChatRequest) -> Result<TextStream, LlmError> {
        let executor = self.executor_for(&request.model).await?;
        executor.execute_stream(request).await
    }

    /// Models installed on the local Ollama server, as `ollama/<name>` ids
    pub async fn list_local_models(&self) -> Result<Vec<String>, LlmError> {
        let handle = self.registry.get_handle(ProviderType::Ollama).await?;
        providers::ollama::list_models(&handle).await
    }

    /// Run `template` against each model in turn. See [`compare`].
    pub async fn compare<I, S>(&self, models: I, template: &ChatRequest) -> ComparisonResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        compare(self, models, template).await
    }

    /// Run `template` against each model in turn, reporting each outcome as it arrives
    pub async fn compare_with<I, S, F>(
        &self,
        models: I,
        template: &ChatRequest,
        on_outcome: F,
    ) -> ComparisonResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&ModelOutcome),
    {
        compare_with(self, models, template, on_outcome).await
    }
}

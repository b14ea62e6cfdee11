//! Ollama model listing

use serde::Deserialize;

use crate::error::LlmError;
use crate::provider::{OLLAMA_PREFIX, ProviderType};
use crate::registry::ProviderHandle;
use crate::utils::error_handling::ensure_success;
use crate::utils::url::join_url;

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

/// List locally installed models as routable ids (`ollama/<name>`)
pub async fn list_models(handle: &ProviderHandle) -> Result<Vec<String>, LlmError> {
    handle.ensure_provider(ProviderType::Ollama)?;
    let url = join_url(handle.base_url(), "/api/tags");
    tracing::debug!("GET {}", url);

    let response = handle
        .http_client()
        .get(url)
        .timeout(handle.timeout())
        .send()
        .await
        .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;
    let response = ensure_success(response).await?;

    let tags: OllamaTagsResponse = response
        .json()
        .await
        .map_err(|e| LlmError::ParseError(format!("Invalid Ollama tags response: {e}")))?;

    Ok(tags
        .models
        .into_iter()
        .map(|m| format!("{OLLAMA_PREFIX}{}", m.name))
        .collect())
}

//! HTTP error mapping
//!
//! Backends report failures as a non-success status with a JSON body. The
//! message is pulled out of the common envelopes (`{"error": {"message": ..}}`,
//! `{"error": ".."}`) so the caller sees the backend's own explanation.

use crate::error::LlmError;

/// Pass a successful response through, or turn a failed one into [`LlmError::ApiError`]
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error_from_body(status.as_u16(), &body))
}

/// Build an [`LlmError::ApiError`] from a status code and raw error body
pub fn api_error_from_body(code: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| error_message(&json))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP status {code}")
            } else {
                trimmed.to_string()
            }
        });
    LlmError::ApiError { code, message }
}

/// Extract the message from a JSON error envelope
pub fn error_message(json: &serde_json::Value) -> Option<String> {
    let error = json.get("error")?;
    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(str::to_string)
}

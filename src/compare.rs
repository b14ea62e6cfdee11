//! Comparison runner
//!
//! Sends one prompt to several models, one after another, and records each
//! model's answer or error. A failing model never stops the run.

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::types::ChatRequest;

/// Result of a single model in a comparison
#[derive(Debug, Clone)]
pub struct ModelOutcome {
    pub model: String,
    pub outcome: Result<String, LlmError>,
}

impl ModelOutcome {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn text(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&LlmError> {
        self.outcome.as_ref().err()
    }
}

/// Outcomes in the order the models were given
#[derive(Debug, Clone, Default)]
pub struct ComparisonResult {
    pub outcomes: Vec<ModelOutcome>,
}

impl ComparisonResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelOutcome> {
        self.outcomes.iter()
    }

    /// First outcome recorded for `model`
    pub fn get(&self, model: &str) -> Option<&ModelOutcome> {
        self.outcomes.iter().find(|o| o.model == model)
    }

    /// `(model, text)` for every model that answered
    pub fn successes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.text().map(|text| (o.model.as_str(), text)))
    }

    /// `(model, error)` for every model that failed
    pub fn failures(&self) -> impl Iterator<Item = (&str, &LlmError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error().map(|e| (o.model.as_str(), e)))
    }
}

impl IntoIterator for ComparisonResult {
    type Item = ModelOutcome;
    type IntoIter = std::vec::IntoIter<ModelOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonResult {
    type Item = &'a ModelOutcome;
    type IntoIter = std::slice::Iter<'a, ModelOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Run `template` against each model in order, substituting the model id.
///
/// Duplicated models are queried once per occurrence. The template's own
/// `model` field is ignored.
pub async fn compare<I, S>(client: &LlmClient, models: I, template: &ChatRequest) -> ComparisonResult
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    compare_with(client, models, template, |_| {}).await
}

/// Like [`compare`], calling `on_outcome` as soon as each model finishes
pub async fn compare_with<I, S, F>(
    client: &LlmClient,
    models: I,
    template: &ChatRequest,
    mut on_outcome: F,
) -> ComparisonResult
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: FnMut(&ModelOutcome),
{
    let mut outcomes = Vec::new();
    for model in models {
        let model = model.into();
        let request = template.for_model(model.clone());
        let outcome = client.chat(&request).await;
        if let Err(e) = &outcome {
            tracing::warn!(model = %model, "Comparison request failed: {}", e);
        }
        let outcome = ModelOutcome { model, outcome };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }
    ComparisonResult { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn sample() -> ComparisonResult {
        ComparisonResult {
            outcomes: vec![
                ModelOutcome {
                    model: "gpt-4o".into(),
                    outcome: Ok("42".into()),
                },
                ModelOutcome {
                    model: "gemini-pro".into(),
                    outcome: Err(LlmError::ConfigurationError("no key".into())),
                },
            ],
        }
    }

    #[test]
    fn accessors() {
        let result = sample();
        assert_eq!(result.len(), 2);
        assert_eq!(result.successes().collect::<Vec<_>>(), vec![("gpt-4o", "42")]);
        let failures: Vec<_> = result.failures().map(|(m, _)| m).collect();
        assert_eq!(failures, vec!["gemini-pro"]);
        assert!(result.get("gemini-pro").is_some_and(|o| !o.is_ok()));
        assert!(result.get("claude-3").is_none());
    }

    #[tokio::test]
    async fn empty_model_list() {
        let client = LlmClient::from_config(ClientConfig::default());
        let result = compare(&client, Vec::<String>::new(), &ChatRequest::new("", "hi")).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn callback_sees_each_outcome_as_it_completes() {
        let client = LlmClient::from_config(ClientConfig::default());
        let mut seen = Vec::new();
        let result = compare_with(
            &client,
            ["gemini-pro", "gemini-1.5-flash"],
            &ChatRequest::new("", "hi"),
            |outcome| seen.push((outcome.model.clone(), outcome.is_ok())),
        )
        .await;
        assert_eq!(
            seen,
            vec![("gemini-pro".to_string(), false), ("gemini-1.5-flash".to_string(), false)]
        );
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn failures_are_recorded_in_order() {
        // Neither call reaches the network: Gemini has no key configured.
        let client = LlmClient::from_config(ClientConfig::default());
        let result = client
            .compare(["gemini-pro", "gemini-2.0-flash"], &ChatRequest::new("", "hi"))
            .await;
        let models: Vec<&str> = result.iter().map(|o| o.model.as_str()).collect();
        assert_eq!(models, vec!["gemini-pro", "gemini-2.0-flash"]);
        assert!(
            result
                .iter()
                .all(|o| matches!(o.error(), Some(LlmError::ConfigurationError(_))))
        );
    }
}

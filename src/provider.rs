//! Provider identification
//!
//! Routing is decided from the model identifier alone, with no network call.
//! The mapping is total: every string resolves to exactly one provider, and
//! identifiers that match no known pattern are assumed to name a locally hosted
//! Ollama model.

use crate::error::LlmError;
use std::fmt;
use std::str::FromStr;

/// Prefix that marks a model as served by the local Ollama daemon
pub const OLLAMA_PREFIX: &str = "ollama/";

/// Prefix used by OpenAI fine-tuned model ids
pub const FINE_TUNE_PREFIX: &str = "ft:";

/// The closed set of supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    Ollama,
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderType {
    /// All providers, in registry slot order
    pub const ALL: [ProviderType; 4] = [
        ProviderType::Ollama,
        ProviderType::OpenAi,
        ProviderType::Anthropic,
        ProviderType::Gemini,
    ];

    /// Resolve the provider that serves `model`.
    ///
    /// Rules are checked in order and matching is case-insensitive:
    /// `ollama/` prefix, then `gpt` / `o1` / `ft:` (OpenAI), then `claude`,
    /// then `gemini`. Anything else falls back to Ollama.
    pub fn from_model(model: &str) -> Self {
        let model = model.to_lowercase();

        if model.starts_with(OLLAMA_PREFIX) {
            ProviderType::Ollama
        } else if model.contains("gpt") || model.contains("o1") || model.starts_with(FINE_TUNE_PREFIX)
        {
            ProviderType::OpenAi
        } else if model.contains("claude") {
            ProviderType::Anthropic
        } else if model.contains("gemini") {
            ProviderType::Gemini
        } else {
            ProviderType::Ollama
        }
    }

    /// Lower-case provider tag
    pub const fn id(&self) -> &'static str {
        match self {
            ProviderType::Ollama => "ollama",
            ProviderType::OpenAi => "openai",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Gemini => "gemini",
        }
    }

    /// Whether the provider runs locally and needs no credentials
    pub const fn is_local(&self) -> bool {
        matches!(self, ProviderType::Ollama)
    }

    pub(crate) const fn slot(&self) -> usize {
        match self {
            ProviderType::Ollama => 0,
            ProviderType::OpenAi => 1,
            ProviderType::Anthropic => 2,
            ProviderType::Gemini => 3,
        }
    }
}

/// Free-function form of [`ProviderType::from_model`]
pub fn identify_provider(model: &str) -> ProviderType {
    ProviderType::from_model(model)
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderType::Ollama),
            "openai" => Ok(ProviderType::OpenAi),
            "anthropic" => Ok(ProviderType::Anthropic),
            "gemini" | "google" => Ok(ProviderType::Gemini),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Strip the local-provider prefix, case-insensitively, from a model id
pub fn strip_ollama_prefix(model: &str) -> &str {
    match model.get(..OLLAMA_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(OLLAMA_PREFIX) => &model[OLLAMA_PREFIX.len()..],
        _ => model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_prefix_wins_in_any_case() {
        for model in ["ollama/llama3", "OLLAMA/llama3", "Ollama/gpt-oss", "ollama/claude-clone"] {
            assert_eq!(ProviderType::from_model(model), ProviderType::Ollama, "{model}");
        }
    }

    #[test]
    fn openai_patterns() {
        for model in ["gpt-4o", "GPT-4o", "chatgpt-4o-latest", "o1-preview", "ft:gpt-3.5:acme::x"] {
            assert_eq!(ProviderType::from_model(model), ProviderType::OpenAi, "{model}");
        }
    }

    #[test]
    fn anthropic_and_gemini_patterns() {
        assert_eq!(
            ProviderType::from_model("claude-sonnet-4-20250514"),
            ProviderType::Anthropic
        );
        assert_eq!(ProviderType::from_model("Claude-3-Haiku"), ProviderType::Anthropic);
        assert_eq!(ProviderType::from_model("gemini-2.0-flash"), ProviderType::Gemini);
        assert_eq!(ProviderType::from_model("models/GEMINI-pro"), ProviderType::Gemini);
    }

    #[test]
    fn openai_rule_outranks_later_rules() {
        // "o1" appears inside other names too; the earlier rule wins
        assert_eq!(ProviderType::from_model("claude-o1-mix"), ProviderType::OpenAi);
        assert_eq!(ProviderType::from_model("gemini-gpt"), ProviderType::OpenAi);
    }

    #[test]
    fn unknown_models_fall_back_to_ollama() {
        assert_eq!(ProviderType::from_model("mystery-model"), ProviderType::Ollama);
        assert_eq!(ProviderType::from_model("llama3.2"), ProviderType::Ollama);
        assert_eq!(ProviderType::from_model(""), ProviderType::Ollama);
        assert_eq!(identify_provider("bad-provider-name"), ProviderType::Ollama);
    }

    #[test]
    fn parse_tags() {
        assert_eq!("OpenAI".parse::<ProviderType>().unwrap(), ProviderType::OpenAi);
        assert_eq!("google".parse::<ProviderType>().unwrap(), ProviderType::Gemini);
        let err = "cohere".parse::<ProviderType>().unwrap_err();
        assert!(matches!(err, LlmError::UnsupportedProvider(name) if name == "cohere"));
    }

    #[test]
    fn tags_round_trip() {
        for p in ProviderType::ALL {
            assert_eq!(p.id().parse::<ProviderType>().unwrap(), p);
            assert_eq!(p.to_string(), p.id());
        }
    }

    #[test]
    fn strips_prefix_only_at_start() {
        assert_eq!(strip_ollama_prefix("ollama/llama3"), "llama3");
        assert_eq!(strip_ollama_prefix("OLLAMA/llama3"), "llama3");
        assert_eq!(strip_ollama_prefix("llama3"), "llama3");
        assert_eq!(strip_ollama_prefix("my-ollama/llama3"), "my-ollama/llama3");
    }
}

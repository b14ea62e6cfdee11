//! Provider configuration
//!
//! Endpoints and credentials for every provider, read once from the environment
//! (or assembled explicitly for tests and embedders). Credential presence is not
//! checked here; the client registry decides which providers require a key.

use secrecy::SecretString;
use std::time::Duration;

use crate::provider::ProviderType;

pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const GEMINI_BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_ENV: &str = "UNICHAT_TIMEOUT_SECS";

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Endpoint and credential for a single provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<SecretString>,
}

impl ProviderSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }
}

/// HTTP configuration shared by every provider handle
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout. Streaming calls apply it to the initial response only.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Configuration for all providers
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub ollama: ProviderSettings,
    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
    pub gemini: ProviderSettings,
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ollama: ProviderSettings::new(DEFAULT_OLLAMA_BASE_URL),
            openai: ProviderSettings::new(DEFAULT_OPENAI_BASE_URL),
            anthropic: ProviderSettings::new(DEFAULT_ANTHROPIC_BASE_URL),
            gemini: ProviderSettings::new(DEFAULT_GEMINI_BASE_URL),
            http: HttpConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secret = |key: &str| var(key).map(SecretString::from);

        let timeout = match var(TIMEOUT_ENV).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) => Duration::from_secs(secs),
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid {}: {}", TIMEOUT_ENV, e);
                DEFAULT_TIMEOUT
            }
            None => DEFAULT_TIMEOUT,
        };

        Self {
            ollama: ProviderSettings {
                base_url: var(OLLAMA_HOST_ENV)
                    .map(|host| normalize_ollama_host(&host))
                    .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
                api_key: None,
            },
            openai: ProviderSettings {
                base_url: var(OPENAI_BASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                api_key: secret(OPENAI_API_KEY_ENV),
            },
            anthropic: ProviderSettings {
                base_url: var(ANTHROPIC_BASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
                api_key: secret(ANTHROPIC_API_KEY_ENV),
            },
            gemini: ProviderSettings {
                base_url: var(GEMINI_BASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                api_key: secret(GEMINI_API_KEY_ENV).or_else(|| secret(GOOGLE_API_KEY_ENV)),
            },
            http: HttpConfig { timeout },
        }
    }

    /// Settings for one provider
    pub fn settings(&self, provider: ProviderType) -> &ProviderSettings {
        match provider {
            ProviderType::Ollama => &self.ollama,
            ProviderType::OpenAi => &self.openai,
            ProviderType::Anthropic => &self.anthropic,
            ProviderType::Gemini => &self.gemini,
        }
    }

    fn settings_mut(&mut self, provider: ProviderType) -> &mut ProviderSettings {
        match provider {
            ProviderType::Ollama => &mut self.ollama,
            ProviderType::OpenAi => &mut self.openai,
            ProviderType::Anthropic => &mut self.anthropic,
            ProviderType::Gemini => &mut self.gemini,
        }
    }

    pub fn with_base_url(mut self, provider: ProviderType, base_url: impl Into<String>) -> Self {
        self.settings_mut(provider).base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, provider: ProviderType, api_key: impl Into<String>) -> Self {
        self.settings_mut(provider).api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn without_api_key(mut self, provider: ProviderType) -> Self {
        self.settings_mut(provider).api_key = None;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }
}

/// `OLLAMA_HOST` is often given as `host:port` without a scheme
fn normalize_ollama_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.ollama.base_url, DEFAULT_OLLAMA_BASE_URL);
        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
        assert!(config.openai.api_key.is_none());
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.http.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn gemini_key_falls_back_to_google_key() {
        let config = ClientConfig::from_lookup(lookup(&[(GOOGLE_API_KEY_ENV, "g-key")]));
        assert_eq!(
            config.gemini.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("g-key".to_string())
        );

        let config = ClientConfig::from_lookup(lookup(&[
            (GEMINI_API_KEY_ENV, "primary"),
            (GOOGLE_API_KEY_ENV, "secondary"),
        ]));
        assert_eq!(
            config.gemini.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("primary".to_string())
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let config = ClientConfig::from_lookup(lookup(&[(OPENAI_API_KEY_ENV, "  ")]));
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn ollama_host_gets_scheme() {
        let config = ClientConfig::from_lookup(lookup(&[(OLLAMA_HOST_ENV, "10.0.0.5:11434/")]));
        assert_eq!(config.ollama.base_url, "http://10.0.0.5:11434");
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(config.http.timeout, DEFAULT_TIMEOUT);

        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "5")]));
        assert_eq!(config.http.timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_output_hides_keys() {
        let config = ClientConfig::default().with_api_key(ProviderType::OpenAi, "sk-very-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-very-secret"));
    }
}

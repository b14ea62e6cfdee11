//! Client registry
//!
//! Holds one [`ProviderHandle`] per provider, built on first use and reused for
//! every later request in the process. Construction is guarded per slot, so
//! concurrent first use builds exactly one handle and all callers observe it.
//! After that the cache is read-only.
//!
//! A registry backed by a variable lookup (the process-wide one reads the
//! environment) resolves a provider's settings when that provider's handle is
//! built, so a credential exported after an earlier failed attempt is picked up.

use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::{ClientConfig, GEMINI_API_KEY_ENV, GOOGLE_API_KEY_ENV};
use crate::error::LlmError;
use crate::provider::ProviderType;

/// Per-provider connection and authorization state
#[derive(Clone)]
pub struct ProviderHandle {
    provider: ProviderType,
    base_url: String,
    api_key: Option<SecretString>,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl ProviderHandle {
    pub fn provider(&self) -> ProviderType {
        self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// Fail with [`LlmError::UnsupportedProvider`] unless this handle belongs to `expected`
    pub(crate) fn ensure_provider(&self, expected: ProviderType) -> Result<(), LlmError> {
        if self.provider == expected {
            Ok(())
        } else {
            Err(LlmError::UnsupportedProvider(format!(
                "{} adapter cannot use a {} handle",
                expected, self.provider
            )))
        }
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Variable lookup consulted each time a handle is built
pub type ConfigLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

enum ConfigSource {
    Fixed(ClientConfig),
    Lookup(ConfigLookup),
}

/// Lazily-initialized, cached provider handles
pub struct ClientRegistry {
    source: ConfigSource,
    slots: [OnceCell<Arc<ProviderHandle>>; 4],
    built: AtomicUsize,
}

static GLOBAL: OnceLock<Arc<ClientRegistry>> = OnceLock::new();

impl ClientRegistry {
    /// Registry with a fixed configuration
    pub fn new(config: ClientConfig) -> Self {
        Self::with_source(ConfigSource::Fixed(config))
    }

    /// Registry that reads its settings through `lookup` whenever a handle is built
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self::with_source(ConfigSource::Lookup(Arc::new(lookup)))
    }

    /// Registry backed by the process environment
    pub fn from_env() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    fn with_source(source: ConfigSource) -> Self {
        Self {
            source,
            slots: std::array::from_fn(|_| OnceCell::new()),
            built: AtomicUsize::new(0),
        }
    }

    /// Process-wide registry backed by the environment
    pub fn global() -> Arc<ClientRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(ClientRegistry::from_env()))
            .clone()
    }

    /// Current configuration. Lookup-backed registries re-read their variables.
    pub fn config(&self) -> ClientConfig {
        match &self.source {
            ConfigSource::Fixed(config) => config.clone(),
            ConfigSource::Lookup(lookup) => ClientConfig::from_lookup(|key| lookup(key)),
        }
    }

    /// Get the handle for `provider`, building it on first use.
    ///
    /// Gemini requires an API key and fails with [`LlmError::ConfigurationError`]
    /// without one. A failed build leaves the slot empty.
    pub async fn get_handle(&self, provider: ProviderType) -> Result<Arc<ProviderHandle>, LlmError> {
        self.slots[provider.slot()]
            .get_or_try_init(|| async { self.build_handle(provider).map(Arc::new) })
            .await
            .cloned()
    }

    /// Whether a handle for `provider` has been built
    pub fn is_initialized(&self, provider: ProviderType) -> bool {
        self.slots[provider.slot()].initialized()
    }

    /// Number of handles constructed so far
    pub fn handles_built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    fn build_handle(&self, provider: ProviderType) -> Result<ProviderHandle, LlmError> {
        let config = self.config();
        let settings = config.settings(provider);

        if provider == ProviderType::Gemini && settings.api_key.is_none() {
            return Err(LlmError::ConfigurationError(format!(
                "{GEMINI_API_KEY_ENV} or {GOOGLE_API_KEY_ENV} environment variable required"
            )));
        }
        if !provider.is_local() && settings.api_key.is_none() {
            tracing::debug!("No API key configured for {}; requests are sent unauthenticated", provider);
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(config.http.timeout)
            .build()
            .map_err(|e| {
                LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
            })?;

        self.built.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            provider = provider.id(),
            base_url = %settings.base_url,
            has_api_key = settings.api_key.is_some(),
            "Initialized provider handle"
        );

        Ok(ProviderHandle {
            provider,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            http_client,
            timeout: config.http.timeout,
        })
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized: Vec<&str> = ProviderType::ALL
            .iter()
            .filter(|p| self.is_initialized(**p))
            .map(|p| p.id())
            .collect();
        f.debug_struct("ClientRegistry")
            .field("initialized", &initialized)
            .finish()
    }
}

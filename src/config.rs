use crate::error::{Result, TryOnError};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://ark.cn-beijing.volces.com";
pub const DEFAULT_PROXY_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_MODEL: &str = "doubao-seedream-4-0-250828";
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

const API_KEY_VAR: &str = "ARK_API_KEY";
const LEGACY_API_KEY_VAR: &str = "VITE_ARK_API_KEY";

/// Where the proxy forwards to, and the key it signs requests with.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub proxy_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub generation: GenerationConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl UpstreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .or_else(|_| env::var(LEGACY_API_KEY_VAR))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = env::var("ARK_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());

        UpstreamConfig { base_url, api_key }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(TryOnError::MissingApiKey(API_KEY_VAR))
    }

    /// First six characters of the key, safe to print.
    pub fn api_key_hint(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| format!("{}...", key.chars().take(6).collect::<String>()))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            proxy_url: DEFAULT_PROXY_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let proxy_url = env::var("SEEDREAM_PROXY_URL").unwrap_or(defaults.proxy_url);
        let model = env::var("SEEDREAM_MODEL").unwrap_or(defaults.model);
        let timeout = env::var("SEEDREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        GenerationConfig {
            proxy_url,
            model,
            timeout,
        }
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = proxy_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upstream: UpstreamConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Config {
            host,
            port,
            upstream: UpstreamConfig::from_env(),
            generation: GenerationConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_upstream(mut self, config: UpstreamConfig) -> Self {
        self.upstream = config;
        self
    }

    pub fn with_generation(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

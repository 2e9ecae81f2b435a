use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.githubcopilot.com";
pub const DEFAULT_TOKEN_URL: &str = "https://api.github.com/copilot_internal/v2/token";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: default_token_url(),
            proxy_url: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl DiscoveryConfig {
    pub fn from_env() -> Self {
        let base_url = env_value("COPILOT_MODELS_BASE_URL").unwrap_or_else(default_base_url);
        let token_url = env_value("COPILOT_MODELS_TOKEN_URL").unwrap_or_else(default_token_url);
        let proxy_url = env_value("COPILOT_MODELS_PROXY_URL");
        let request_timeout_ms = env_value("COPILOT_MODELS_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);
        Self {
            base_url,
            token_url,
            proxy_url,
            request_timeout_ms,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

use crate::config::DiscoveryConfig;
use crate::credential::Credential;
use crate::error::DiscoveryError;
use reqwest::header::ACCEPT;

/// Candidate model-list paths, probed in order.
pub const MODEL_LIST_PATHS: &[&str] = &["/models", "/v1/models"];

pub const COPILOT_USER_AGENT: &str = "GitHubCopilotChat/0.26.7";
pub const COPILOT_EDITOR_VERSION: &str = "vscode/1.99.3";
pub const COPILOT_PLUGIN_VERSION: &str = "copilot-chat/0.26.7";
pub const COPILOT_OPENAI_INTENT: &str = "conversation-panel";
pub const COPILOT_INTEGRATION_ID: &str = "vscode-chat";
pub const COPILOT_GITHUB_API_VERSION: &str = "2025-04-01";
pub const COPILOT_USER_AGENT_LIBRARY_VERSION: &str = "electron-fetch";

const DIRECT_PROXY_VALUES: &[&str] = &["direct", "none"];

/// Builds the outbound client for one credential, honouring its network policy.
pub trait ClientFactory: Send + Sync {
    fn build(
        &self,
        config: &DiscoveryConfig,
        credential: &Credential,
    ) -> Result<reqwest::Client, DiscoveryError>;
}

/// Proxy from the credential first, then the config. `direct` or `none`
/// disables proxying, including any proxy picked up from the environment.
#[derive(Debug, Clone, Default)]
pub struct ProxyAwareClientFactory;

impl ClientFactory for ProxyAwareClientFactory {
    fn build(
        &self,
        config: &DiscoveryConfig,
        credential: &Credential,
    ) -> Result<reqwest::Client, DiscoveryError> {
        let mut builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms));
        let proxy_url = credential.proxy_url().or_else(|| {
            config
                .proxy_url
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        });
        if let Some(proxy_url) = proxy_url {
            if DIRECT_PROXY_VALUES
                .iter()
                .any(|direct| proxy_url.eq_ignore_ascii_case(direct))
            {
                builder = builder.no_proxy();
            } else {
                let proxy = reqwest::Proxy::all(&proxy_url)
                    .map_err(|err| DiscoveryError::ClientBuild(err.to_string()))?;
                builder = builder.proxy(proxy);
            }
        }
        builder
            .build()
            .map_err(|err| DiscoveryError::ClientBuild(err.to_string()))
    }
}

pub fn apply_model_headers(
    req: reqwest::RequestBuilder,
    api_token: &str,
) -> reqwest::RequestBuilder {
    req.bearer_auth(api_token)
        .header(ACCEPT, "application/json")
        .header(reqwest::header::USER_AGENT, COPILOT_USER_AGENT)
        .header("Editor-Version", COPILOT_EDITOR_VERSION)
        .header("Editor-Plugin-Version", COPILOT_PLUGIN_VERSION)
        .header("Openai-Intent", COPILOT_OPENAI_INTENT)
        .header("Copilot-Integration-Id", COPILOT_INTEGRATION_ID)
        .header("X-Github-Api-Version", COPILOT_GITHUB_API_VERSION)
        .header(
            "X-Vscode-User-Agent-Library-Version",
            COPILOT_USER_AGENT_LIBRARY_VERSION,
        )
}

/// Builds the GET for one candidate path. Any failure here is a
/// configuration problem, not a transient one.
pub fn build_model_list_request(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    api_token: &str,
) -> Result<reqwest::Request, DiscoveryError> {
    let url = join_url(base_url, path);
    apply_model_headers(client.get(url), api_token)
        .build()
        .map_err(|err| DiscoveryError::RequestBuild(err.to_string()))
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

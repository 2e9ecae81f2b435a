use crate::config::DiscoveryConfig;
use crate::context::CallContext;
use crate::error::DiscoveryError;
use crate::upstream::{COPILOT_EDITOR_VERSION, COPILOT_PLUGIN_VERSION, COPILOT_USER_AGENT};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;

/// Short-lived upstream API token obtained from a long-lived access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiToken {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_in: Option<i64>,
}

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
            refresh_in: None,
        }
    }
}

#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(
        &self,
        ctx: &CallContext,
        access_token: &str,
    ) -> Result<ApiToken, DiscoveryError>;
}

/// Exchanges a GitHub OAuth token at the Copilot token endpoint.
#[derive(Debug, Clone)]
pub struct GithubTokenExchanger {
    http: reqwest::Client,
    token_url: String,
}

impl GithubTokenExchanger {
    pub fn new(http: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &DiscoveryConfig) -> Self {
        Self::new(http, config.token_url.clone())
    }
}

#[async_trait]
impl TokenExchanger for GithubTokenExchanger {
    async fn exchange(
        &self,
        ctx: &CallContext,
        access_token: &str,
    ) -> Result<ApiToken, DiscoveryError> {
        let req = self
            .http
            .get(&self.token_url)
            .header(AUTHORIZATION, format!("token {access_token}"))
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, COPILOT_USER_AGENT)
            .header("Editor-Version", COPILOT_EDITOR_VERSION)
            .header("Editor-Plugin-Version", COPILOT_PLUGIN_VERSION)
            .build()
            .map_err(|err| DiscoveryError::TokenExchange(err.to_string()))?;

        let resp = ctx
            .run(self.http.execute(req))
            .await?
            .map_err(|err| DiscoveryError::TokenExchange(err.to_string()))?;
        let status = resp.status();
        let text = ctx
            .run(resp.text())
            .await?
            .map_err(|err| DiscoveryError::TokenExchange(err.to_string()))?;
        if !status.is_success() {
            return Err(DiscoveryError::TokenExchange(format!(
                "upstream status {status}"
            )));
        }
        serde_json::from_str::<ApiToken>(&text)
            .map_err(|err| DiscoveryError::TokenExchange(format!("invalid token response: {err}")))
    }
}

//! Per-credential model discovery against the Copilot upstream.
//!
//! Flow: access token -> cache -> token exchange -> candidate paths in order
//! -> normalize -> cache. Every failure is typed internally; [`ModelDiscovery::discover`]
//! collapses them to `None` so callers fall back to their own model list.

use crate::cache::ModelCache;
use crate::catalog::{ModelCatalog, StaticCatalog};
use crate::config::DiscoveryConfig;
use crate::context::CallContext;
use crate::credential::Credential;
use crate::error::{AttemptError, DiscoveryError};
use crate::model_registry::ModelInfo;
use crate::normalize::parse_models;
use crate::token::TokenExchanger;
use crate::upstream::{
    ClientFactory, MODEL_LIST_PATHS, ProxyAwareClientFactory, build_model_list_request,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ModelDiscovery {
    cache: ModelCache,
    catalog: Arc<dyn ModelCatalog>,
    exchanger: Arc<dyn TokenExchanger>,
    clients: Arc<dyn ClientFactory>,
}

impl ModelDiscovery {
    pub fn new(cache: ModelCache, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self {
            cache,
            catalog: Arc::new(StaticCatalog::copilot().clone()),
            exchanger,
            clients: Arc::new(ProxyAwareClientFactory),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn ModelCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_client_factory(mut self, clients: Arc<dyn ClientFactory>) -> Self {
        self.clients = clients;
        self
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    /// Models reachable with `credential`, or `None` when none could be
    /// discovered for any reason.
    pub async fn discover(
        &self,
        ctx: &CallContext,
        credential: Option<&Credential>,
        config: &DiscoveryConfig,
    ) -> Option<Vec<ModelInfo>> {
        let credential_id = credential.map(|c| c.id.as_str()).unwrap_or_default();
        match self.try_discover(ctx, credential, config).await {
            Ok(models) => Some(models),
            Err(err) => {
                match err {
                    DiscoveryError::TokenExchange(_)
                    | DiscoveryError::EmptyApiToken
                    | DiscoveryError::ClientBuild(_)
                    | DiscoveryError::RequestBuild(_) => {
                        tracing::warn!(credential = %credential_id, code = err.code(), "copilot model discovery failed: {err}");
                    }
                    _ => {
                        tracing::debug!(credential = %credential_id, code = err.code(), "copilot model discovery returned nothing: {err}");
                    }
                }
                None
            }
        }
    }

    pub async fn try_discover(
        &self,
        ctx: &CallContext,
        credential: Option<&Credential>,
        config: &DiscoveryConfig,
    ) -> Result<Vec<ModelInfo>, DiscoveryError> {
        let credential = credential.ok_or(DiscoveryError::MissingCredential)?;
        let access_token = credential
            .access_token()
            .ok_or(DiscoveryError::MissingAccessToken)?;

        if let Some(cached) = self.cache.lookup(&access_token) {
            if !cached.is_empty() {
                metrics::counter!("copilot_models_cache_total", "outcome" => "hit").increment(1);
                tracing::debug!(credential = %credential.id, count = cached.len(), "copilot models served from cache");
                return Ok(cached);
            }
        }
        metrics::counter!("copilot_models_cache_total", "outcome" => "miss").increment(1);

        let result = self.fetch(ctx, credential, &access_token, config).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(DiscoveryError::Exhausted { .. }) => "exhausted",
            Err(_) => "aborted",
        };
        metrics::counter!("copilot_models_fetch_total", "outcome" => outcome).increment(1);
        result
    }

    async fn fetch(
        &self,
        ctx: &CallContext,
        credential: &Credential,
        access_token: &str,
        config: &DiscoveryConfig,
    ) -> Result<Vec<ModelInfo>, DiscoveryError> {
        let api_token = ctx
            .run(self.exchanger.exchange(ctx, access_token))
            .await??;
        let api_token = api_token.token.trim();
        if api_token.is_empty() {
            return Err(DiscoveryError::EmptyApiToken);
        }

        let client = self.clients.build(config, credential)?;
        for path in MODEL_LIST_PATHS {
            match self
                .fetch_path(ctx, &client, &config.base_url, path, api_token)
                .await?
            {
                Ok(models) => {
                    self.cache.store(access_token, &models);
                    tracing::info!(
                        credential = %credential.id,
                        path = %path,
                        count = models.len(),
                        "copilot models discovered"
                    );
                    return Ok(models);
                }
                Err(err) => {
                    tracing::debug!(path = %path, error = %err, "copilot model list attempt failed");
                }
            }
        }
        Err(DiscoveryError::Exhausted {
            attempts: MODEL_LIST_PATHS.len(),
        })
    }

    /// Outer error aborts discovery; inner error moves on to the next path.
    async fn fetch_path(
        &self,
        ctx: &CallContext,
        client: &reqwest::Client,
        base_url: &str,
        path: &str,
        api_token: &str,
    ) -> Result<Result<Vec<ModelInfo>, AttemptError>, DiscoveryError> {
        ctx.check()?;
        let req = build_model_list_request(client, base_url, path, api_token)?;
        let resp = match ctx.run(client.execute(req)).await? {
            Ok(resp) => resp,
            Err(err) => return Ok(Err(AttemptError::Transport(err.to_string()))),
        };
        let status = resp.status();
        let body = match ctx.run(resp.bytes()).await? {
            Ok(body) => body,
            Err(err) => return Ok(Err(AttemptError::BodyRead(err.to_string()))),
        };
        if !status.is_success() {
            return Ok(Err(AttemptError::Status(status)));
        }
        let models = parse_models(&body, self.catalog.as_ref());
        if models.is_empty() {
            return Ok(Err(AttemptError::Empty));
        }
        Ok(Ok(models))
    }
}

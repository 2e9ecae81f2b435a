use copilot_models::token::GithubTokenExchanger;
use copilot_models::{CallContext, Credential, DiscoveryConfig, ModelCache, ModelDiscovery};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,copilot_models=debug")),
        )
        .json()
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = DiscoveryConfig::from_env();
    let access_token = std::env::var("COPILOT_ACCESS_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| "COPILOT_ACCESS_TOKEN is not set".to_string())?;
    let credential = Credential::new("env").with_metadata("access_token", access_token);

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
        .build()
        .map_err(|err| err.to_string())?;
    let exchanger = Arc::new(GithubTokenExchanger::from_config(http, &config));
    let discovery = ModelDiscovery::new(ModelCache::new(), exchanger);

    let ctx = CallContext::new();
    let canceller = ctx.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let models = discovery
        .try_discover(&ctx, Some(&credential), &config)
        .await
        .map_err(|err| err.to_string())?;
    let out = serde_json::to_string_pretty(&serde_json::json!({
        "object": "list",
        "data": models,
    }))
    .map_err(|err| err.to_string())?;
    println!("{out}");
    Ok(())
}

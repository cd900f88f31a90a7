use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use build_advisor::api::{build_router, AppState};
use build_advisor::build::service::RetryPolicy;
use build_advisor::build::settings::EnvSettingsProvider;
use build_advisor::build::BuildGenerationService;
use build_advisor::config::Config;
use build_advisor::llm::{ModelClientConfig, OpenAiCompatibleClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::default().from_env();

    let model = OpenAiCompatibleClient::new(ModelClientConfig {
        base_url: config.advisor.provider_base_url.clone(),
        timeout: config.advisor.model_timeout(),
    })
    .context("failed to create model client")?;

    let service = BuildGenerationService::new(Arc::new(EnvSettingsProvider), Arc::new(model))
        .with_retry_policy(RetryPolicy {
            max_attempts: config.advisor.retry_attempts,
            base_delay: config.advisor.retry_backoff(),
        });

    let state = AppState {
        service: Arc::new(service),
    };
    let app = build_router(state, config.server.max_body_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("build-advisor listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

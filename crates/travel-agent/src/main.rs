//! travel-agent
//!
//! Asks a tool-calling agent for a day-trip plan at a random destination
//! and prints it.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `GITHUB_ENDPOINT`, `GITHUB_TOKEN`, `GITHUB_MODEL_ID`.

mod config;
mod driver;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::{OpenAiConfig, OpenAiProvider};

use crate::config::AppConfig;
use crate::driver::{build_agent, plan_trip};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for the plan
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    // Initialize LLM provider
    let provider = Arc::new(OpenAiProvider::from_config(OpenAiConfig::new(
        config.endpoint.clone(),
        config.token.clone(),
    ))?);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to {}", config.endpoint),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} did not answer the health check", config.endpoint);
        }
    }

    let agent = build_agent(provider, &config)?;

    tracing::info!("Registered {} tools:", agent.tools().len());
    for name in agent.tools().names() {
        tracing::info!("  • {}", name);
    }
    tracing::info!(model = %agent.config().generation.model, "Planning trip");

    plan_trip(&agent, &mut std::io::stdout()).await
}

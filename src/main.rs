//! agent-recommender - HTTP Server Entry Point
//!
//! Loads the agent catalog and starts the HTTP server that exposes the
//! recommendation API.

use agent_recommender::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_recommender=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: catalog={}, analyzer={}, default_top_n={}",
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(bundled)".to_string()),
        if config.analyzer.is_enabled() {
            config.analyzer.model.as_str()
        } else {
            "(disabled)"
        },
        config.default_top_n
    );
    if config.ranking_jitter > 0.0 {
        info!(
            "Ranking jitter enabled: magnitude={}, seed={:?}",
            config.ranking_jitter, config.ranking_seed
        );
    }

    // Start HTTP server (loads the catalog first; a bad catalog aborts startup)
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    api::serve(config).await?;

    Ok(())
}

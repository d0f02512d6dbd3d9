//! Miluna Sentiment Dashboard - Main Entry Point

use anyhow::Context;
use dashboard::{init_logging, run_server, AppContext, DashboardConfig};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::load().context("loading configuration")?;
    init_logging(&config)?;

    info!(
        "=== {} Sentiment Dashboard v{} ===",
        config.branding.ai_name,
        env!("CARGO_PKG_VERSION")
    );

    let ctx = match AppContext::load(&config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e).context("model could not be loaded; refusing to serve");
        }
    };

    run_server(&config.bind_addr, Arc::new(ctx)).await?;

    Ok(())
}

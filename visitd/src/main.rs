mod server;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use visitd_api::observability::Metrics;
use visitd_core::{
    bootstrap::{init_store, load_config},
    logging,
};

use server::VisitdServer;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load and validate configuration (fails fast on misconfigurations)
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("visitd starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Initialize storage (aborts if the backend is unreachable or schema
    //    provisioning fails)
    let store = init_store(&config).await?;

    // 4. Metrics registry
    let metrics = Arc::new(Metrics::new());

    // 5. Start the HTTP server and wait for shutdown
    let server = VisitdServer::new(config, store, metrics);
    server.start().await?;

    Ok(())
}

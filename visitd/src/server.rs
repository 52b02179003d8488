//! Server lifecycle management
//!
//! Startup and signal-driven graceful shutdown of the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use visitd_api::http::{create_router, AppState};
use visitd_api::observability::Metrics;
use visitd_core::{storage::VisitStore, Config};

/// How long in-flight requests may keep running after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// visitd server - owns the HTTP listener and the storage handle
pub struct VisitdServer {
    config: Config,
    store: Arc<dyn VisitStore>,
    metrics: Arc<Metrics>,
}

impl VisitdServer {
    /// Create a new server instance
    pub fn new(config: Config, store: Arc<dyn VisitStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            config,
            store,
            metrics,
        }
    }

    /// Start the HTTP server and block until shutdown completes.
    pub async fn start(self) -> anyhow::Result<()> {
        let state = AppState::new(
            self.store.clone(),
            self.metrics.clone(),
            self.config.cors.allowed_origins.clone(),
            self.config.server.mode,
        );
        let router = create_router(state);

        let addr: std::net::SocketAddr = self.config.http_address().parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("HTTP server listening on {}", addr);

        // Create shutdown signal channel
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut handle = tokio::spawn(async move {
            let mut rx = shutdown_rx;
            let graceful = async move {
                let _ = rx.changed().await;
            };

            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(graceful)
                .await
            {
                error!("HTTP server error: {}", e);
            }
        });

        tokio::select! {
            _ = &mut handle => {
                error!("HTTP server stopped unexpectedly");
            }
            () = shutdown_signal() => {
                info!("Shutdown signal received, starting graceful shutdown...");
                let _ = shutdown_tx.send(true);

                // Stop accepting new connections and give in-flight requests
                // a bounded grace period to finish.
                match tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await {
                    Ok(_) => info!("HTTP server shut down gracefully"),
                    Err(_) => {
                        warn!(
                            "Grace period of {}s elapsed, aborting remaining requests",
                            SHUTDOWN_GRACE.as_secs()
                        );
                        handle.abort();
                    }
                }
            }
        }

        info!("Closing storage pool...");
        self.store.close().await;
        info!("visitd shut down complete");

        Ok(())
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
